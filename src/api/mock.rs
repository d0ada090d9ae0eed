//! In-memory `FileService` for component tests.
//!
//! Records every call, fails scripted operations with a given message, and can
//! delay each request to exercise concurrency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::FileService;
use crate::error::AppError;
use crate::models::details::{FileDetails, StorageStats, TextDocument};
use crate::models::file::FileEntry;
use crate::models::upload::UploadDescriptor;
use crate::services::cancel::CancelFlag;
use crate::services::chunk_manager;
use crate::services::progress::ProgressReporter;

/// Progress frame size used by the mock upload: 1 MiB.
const MOCK_FRAME_SIZE: u64 = 1_048_576;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(String),
    Move { source: String, dest: String },
    Copy { source: String, dest: String },
    DeleteOne(String),
    DeleteMany(Vec<String>),
    Rename { path: String, new_name: String },
    CreateFolder(String),
    CreateFile { folder: String, filename: String },
    ReadText(String),
    WriteText { path: String, content: String },
    Upload {
        destination: String,
        names: Vec<String>,
    },
    Details(String),
    StorageStats,
}

#[derive(Default)]
pub struct MockFileService {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<String, String>>,
    listings: Mutex<HashMap<String, Vec<FileEntry>>>,
    texts: Mutex<HashMap<String, String>>,
    delay: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockFileService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail `op` (e.g. "move") for `path`, or for every path when `None`.
    pub fn fail_on(&self, op: &str, path: Option<&str>, message: &str) {
        let key = failure_key(op, path);
        self.failures
            .lock()
            .unwrap()
            .insert(key, message.to_string());
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    pub fn set_listing(&self, folder: &str, entries: Vec<FileEntry>) {
        self.listings
            .lock()
            .unwrap()
            .insert(folder.to_string(), entries);
    }

    pub fn set_text(&self, path: &str, content: &str) {
        self.texts
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn request(&self, call: Call, op: &str, path: Option<&str>) -> crate::error::Result<()> {
        self.calls.lock().unwrap().push(call);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.scripted_failure(op, path)
    }

    fn scripted_failure(&self, op: &str, path: Option<&str>) -> crate::error::Result<()> {
        let failures = self.failures.lock().unwrap();
        let message = path
            .and_then(|p| failures.get(&failure_key(op, Some(p))))
            .or_else(|| failures.get(&failure_key(op, None)));
        match message {
            Some(message) => Err(AppError::Remote(message.clone())),
            None => Ok(()),
        }
    }
}

fn failure_key(op: &str, path: Option<&str>) -> String {
    match path {
        Some(p) => format!("{}:{}", op, p),
        None => op.to_string(),
    }
}

impl FileService for MockFileService {
    async fn list_folder(&self, path: &str) -> crate::error::Result<Vec<FileEntry>> {
        self.request(Call::List(path.into()), "list", Some(path))
            .await?;
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_default())
    }

    async fn move_item(&self, source: &str, destination: &str) -> crate::error::Result<()> {
        let call = Call::Move {
            source: source.into(),
            dest: destination.into(),
        };
        self.request(call, "move", Some(source)).await
    }

    async fn copy_item(&self, source: &str, destination: &str) -> crate::error::Result<()> {
        let call = Call::Copy {
            source: source.into(),
            dest: destination.into(),
        };
        self.request(call, "copy", Some(source)).await
    }

    async fn delete_one(&self, path: &str) -> crate::error::Result<()> {
        self.request(Call::DeleteOne(path.into()), "delete", Some(path))
            .await
    }

    async fn delete_many(&self, paths: &[String]) -> crate::error::Result<()> {
        self.request(Call::DeleteMany(paths.to_vec()), "bulk-delete", None)
            .await
    }

    async fn rename(&self, path: &str, new_name: &str) -> crate::error::Result<()> {
        let call = Call::Rename {
            path: path.into(),
            new_name: new_name.into(),
        };
        self.request(call, "rename", Some(path)).await
    }

    async fn create_folder(&self, path: &str) -> crate::error::Result<()> {
        self.request(Call::CreateFolder(path.into()), "create-folder", Some(path))
            .await
    }

    async fn create_file(&self, folder: &str, filename: &str) -> crate::error::Result<()> {
        let call = Call::CreateFile {
            folder: folder.into(),
            filename: filename.into(),
        };
        self.request(call, "create-file", Some(filename)).await
    }

    async fn read_text(&self, path: &str) -> crate::error::Result<TextDocument> {
        self.request(Call::ReadText(path.into()), "read-text", Some(path))
            .await?;
        let content = self
            .texts
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::Remote("File not found".into()))?;
        Ok(TextDocument {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            content,
        })
    }

    async fn write_text(&self, path: &str, content: &str) -> crate::error::Result<()> {
        let call = Call::WriteText {
            path: path.into(),
            content: content.into(),
        };
        self.request(call, "save-text", Some(path)).await?;
        self.set_text(path, content);
        Ok(())
    }

    async fn upload(
        &self,
        destination: &str,
        files: Vec<UploadDescriptor>,
        progress: Arc<ProgressReporter>,
        cancel: CancelFlag,
    ) -> crate::error::Result<()> {
        for file in &files {
            for chunk in chunk_manager::plan_chunks(file.size, MOCK_FRAME_SIZE) {
                cancel.check()?;
                progress.advance(chunk.size);
                tokio::task::yield_now().await;
            }
        }
        let call = Call::Upload {
            destination: destination.into(),
            names: files.iter().map(|f| f.name.clone()).collect(),
        };
        self.request(call, "upload", None).await?;
        cancel.check()
    }

    async fn details(&self, path: &str) -> crate::error::Result<FileDetails> {
        self.request(Call::Details(path.into()), "details", Some(path))
            .await?;
        Ok(FileDetails {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            kind: "File".into(),
            size: "0 B".into(),
            files: None,
            folders: None,
            ctime: String::new(),
            mtime: String::new(),
        })
    }

    async fn storage_stats(&self) -> crate::error::Result<StorageStats> {
        self.request(Call::StorageStats, "storage-stats", None)
            .await?;
        Ok(StorageStats {
            total_size: "0 B".into(),
            total_size_bytes: 0,
            file_count: 0,
            folder_count: 0,
            file_types: Default::default(),
        })
    }
}
