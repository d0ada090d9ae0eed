//! Command handlers for a browsing session.
//!
//! `Session` owns every piece of per-session state (listing snapshot, view
//! controls, clipboard, selection, upload queue, preferences) and a single
//! `dispatch` entry point that routes a `Command` to the handler for its
//! area. Handlers parse parameters and call into `services`; they hold no
//! business rules of their own.
//!
//! Mutations that change the remote folder are followed by a refresh, issued
//! only after the mutation itself has completed.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::v1::HttpFileService;
use crate::api::FileService;
use crate::models::details::{FileDetails, StorageStats, TextDocument};
use crate::models::file::FileEntry;
use crate::models::listing::{ListingQuery, SortKey, TypeFilter};
use crate::models::settings::{AppConfig, Preferences};
use crate::models::upload::{UploadDescriptor, UploadProgress};
use crate::services::cancel::CancelFlag;
use crate::services::clipboard::ClipboardManager;
use crate::services::listing::filter_and_sort;
use crate::services::selection::SelectionTracker;
use crate::services::upload_queue::UploadQueue;
use crate::storage::preferences::load_preferences;
use crate::storage::KeyValueStore;

pub mod clipboard;
pub mod files;
pub mod settings;
pub mod upload;

/// Every user action the session understands.
#[derive(Debug, Clone)]
pub enum Command {
    // Browsing
    Navigate { path: String },
    Refresh,
    SetQuery(String),
    SetTypeFilter(TypeFilter),
    SetSortKey(SortKey),

    // Single-file operations
    NewFolder { name: String },
    NewFile { filename: String },
    Rename { path: String, new_name: String },
    Delete { path: String },
    Move { path: String, destination: String },
    OpenText { path: String },
    SaveText { path: String, content: String },
    Details { path: String },
    Stats,

    // Clipboard
    CopyPath { path: String },
    CutPath { path: String },
    Paste,
    ClearClipboard,
    ClipboardStatus,

    // Bulk selection
    ToggleBulkMode,
    CancelBulk,
    ToggleSelect { path: String },
    BulkCopy,
    BulkCut,
    BulkDelete,

    // Uploads
    QueueUpload(UploadDescriptor),
    RemoveUpload { index: usize },
    StartUpload {
        target_folder: Option<String>,
        new_folder: Option<String>,
    },

    DarkMode,
}

/// What the host should show after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing visible changed.
    Done,
    /// The filtered and sorted listing to render.
    View(Vec<FileEntry>),
    /// A notification, with the refreshed view when the folder changed.
    /// `view` is `None` when nothing needs re-rendering or the refresh failed.
    Toast {
        message: String,
        view: Option<Vec<FileEntry>>,
    },
    Text(TextDocument),
    Details(FileDetails),
    Stats(StorageStats),
}

impl Outcome {
    pub fn toast(message: impl Into<String>) -> Self {
        Outcome::Toast {
            message: message.into(),
            view: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Toast { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub struct Session<F: FileService + 'static, K: KeyValueStore> {
    config: AppConfig,
    service: Arc<F>,
    store: Arc<K>,
    current_path: String,
    snapshot: Vec<FileEntry>,
    query: ListingQuery,
    clipboard: ClipboardManager<Arc<K>>,
    selection: SelectionTracker,
    uploads: UploadQueue,
    preferences: Preferences,
    cancel: CancelFlag,
    progress_tx: Option<UnboundedSender<UploadProgress>>,
}

impl<K: KeyValueStore> Session<HttpFileService, K> {
    /// Session talking to the HTTP service named in `config`.
    pub fn connect(config: AppConfig, store: Arc<K>) -> crate::error::Result<Self> {
        let service = Arc::new(HttpFileService::new(&config)?);
        Ok(Self::new(config, service, store))
    }
}

impl<F: FileService + 'static, K: KeyValueStore> Session<F, K> {
    /// Start a session at the root folder. The clipboard and preferences are
    /// restored from `store`; the listing is empty until the first navigate.
    pub fn new(config: AppConfig, service: Arc<F>, store: Arc<K>) -> Self {
        let clipboard = ClipboardManager::restore(store.clone());
        let preferences = load_preferences(&*store);
        let uploads = UploadQueue::new(config.max_upload_bytes);
        Self {
            config,
            service,
            store,
            current_path: String::new(),
            snapshot: Vec::new(),
            query: ListingQuery::default(),
            clipboard,
            selection: SelectionTracker::new(),
            uploads,
            preferences,
            cancel: CancelFlag::new(),
            progress_tx: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn snapshot(&self) -> &[FileEntry] {
        &self.snapshot
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn clipboard(&self) -> &ClipboardManager<Arc<K>> {
        &self.clipboard
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Shared handle to the upload queue.
    pub fn uploads(&self) -> UploadQueue {
        self.uploads.clone()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Flag for the work scoped to the current folder. Cancelling it makes
    /// in-flight results be discarded.
    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Where upload progress events are sent.
    pub fn set_progress_sink(&mut self, tx: UnboundedSender<UploadProgress>) {
        self.progress_tx = Some(tx);
    }

    /// The current snapshot filtered and sorted by the view controls.
    pub fn view(&self) -> Vec<FileEntry> {
        filter_and_sort(&self.snapshot, &self.query)
    }

    pub async fn dispatch(&mut self, command: Command) -> crate::error::Result<Outcome> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::Navigate { path } => self.navigate(&path).await,
            Command::Refresh => self.refresh().await.map(Outcome::View),
            Command::SetQuery(query) => Ok(self.set_query(query)),
            Command::SetTypeFilter(filter) => Ok(self.set_type_filter(filter)),
            Command::SetSortKey(key) => Ok(self.set_sort_key(key)),

            Command::NewFolder { name } => self.new_folder(&name).await,
            Command::NewFile { filename } => self.new_file(&filename).await,
            Command::Rename { path, new_name } => self.rename(&path, &new_name).await,
            Command::Delete { path } => self.delete(&path).await,
            Command::Move { path, destination } => self.move_to(&path, &destination).await,
            Command::OpenText { path } => self.open_text(&path).await,
            Command::SaveText { path, content } => self.save_text(&path, &content).await,
            Command::Details { path } => self.details(&path).await,
            Command::Stats => self.stats().await,

            Command::CopyPath { path } => self.copy_path(&path),
            Command::CutPath { path } => self.cut_path(&path),
            Command::Paste => self.paste().await,
            Command::ClearClipboard => Ok(self.clear_clipboard()),
            Command::ClipboardStatus => Ok(self.clipboard_status()),

            Command::ToggleBulkMode => Ok(self.toggle_bulk_mode()),
            Command::CancelBulk => Ok(self.cancel_bulk()),
            Command::ToggleSelect { path } => Ok(self.toggle_select(&path)),
            Command::BulkCopy => self.bulk_copy(),
            Command::BulkCut => self.bulk_cut(),
            Command::BulkDelete => self.bulk_delete().await,

            Command::QueueUpload(descriptor) => Ok(self.queue_upload(descriptor)),
            Command::RemoveUpload { index } => Ok(self.remove_upload(index)),
            Command::StartUpload {
                target_folder,
                new_folder,
            } => {
                self.start_upload(target_folder.as_deref(), new_folder.as_deref())
                    .await
            }

            Command::DarkMode => Ok(self.toggle_dark_mode()),
        }
    }

    /// Re-fetch the current folder and replace the snapshot.
    pub async fn refresh(&mut self) -> crate::error::Result<Vec<FileEntry>> {
        let cancel = self.cancel.clone();
        cancel.check()?;
        let entries = self.service.list_folder(&self.current_path).await?;
        if cancel.is_cancelled() {
            log::debug!("Discarding stale listing of '{}'", self.current_path);
            return Err(crate::error::AppError::Cancelled);
        }
        self.replace_snapshot(entries);
        Ok(self.view())
    }

    fn replace_snapshot(&mut self, entries: Vec<FileEntry>) {
        self.snapshot = entries;
        self.selection.prune(&self.snapshot);
    }

    /// Toast for a completed mutation, carrying the refreshed view.
    async fn toast_with_refresh(&mut self, message: impl Into<String>) -> Outcome {
        let view = match self.refresh().await {
            Ok(view) => Some(view),
            Err(e) => {
                log::warn!("Refresh of '{}' failed: {}", self.current_path, e);
                None
            }
        };
        Outcome::Toast {
            message: message.into(),
            view,
        }
    }
}
