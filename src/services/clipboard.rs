//! Cut/copy clipboard manager.
//!
//! Owns the clipboard record and the store it is persisted in. Every change
//! replaces the persisted record wholesale. A failed write is logged and the
//! in-memory clipboard stays authoritative for the session.
//!
//! A paste issues one move (cut) or copy request per staged path, all in
//! flight together, and decides only after every request has settled:
//!
//! - all succeeded: a cut clipboard is cleared, a copy clipboard is kept
//! - any failed: the clipboard is kept and the first failure in staging order
//!   is returned. Requests that already succeeded are not rolled back.

use std::sync::Arc;

use crate::api::FileService;
use crate::error::AppError;
use crate::models::clipboard::{ClipboardMode, ClipboardRecord};
use crate::services::cancel::CancelFlag;
use crate::services::selection::StagedPaths;
use crate::storage::clipboard::{load_clipboard, persist_clipboard};
use crate::storage::KeyValueStore;

/// Outcome of a successful paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteReport {
    pub mode: ClipboardMode,
    pub destination: String,
    pub count: usize,
}

impl PasteReport {
    /// Toast text for the completed paste.
    pub fn message(&self) -> String {
        match self.mode {
            ClipboardMode::Cut => "Files moved successfully".to_string(),
            ClipboardMode::Copy => "Files copied successfully".to_string(),
        }
    }
}

pub struct ClipboardManager<K: KeyValueStore> {
    store: K,
    record: ClipboardRecord,
}

impl<K: KeyValueStore> ClipboardManager<K> {
    /// Restore the clipboard persisted in `store`. Absent or corrupt records
    /// start an empty clipboard.
    pub fn restore(store: K) -> Self {
        let record = load_clipboard(&store);
        if !record.is_empty() {
            log::debug!("Restored clipboard with {} path(s)", record.len());
        }
        Self { store, record }
    }

    pub fn record(&self) -> &ClipboardRecord {
        &self.record
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Replace the clipboard with `paths` in `mode`. Duplicates are dropped,
    /// keeping the first occurrence.
    pub fn stage(
        &mut self,
        mode: ClipboardMode,
        paths: Vec<String>,
    ) -> crate::error::Result<&ClipboardRecord> {
        let record = ClipboardRecord::new(mode, paths);
        if record.is_empty() {
            return Err(AppError::no_files_selected());
        }
        log::info!("Staged {} path(s) for {}", record.len(), mode.as_str());
        self.replace(record);
        Ok(&self.record)
    }

    /// Stage a selection snapshot.
    pub fn stage_selection(
        &mut self,
        staged: StagedPaths,
    ) -> crate::error::Result<&ClipboardRecord> {
        self.stage(staged.mode, staged.paths)
    }

    /// Stage a single path (context-menu copy/cut).
    pub fn stage_one(
        &mut self,
        mode: ClipboardMode,
        path: &str,
    ) -> crate::error::Result<&ClipboardRecord> {
        self.stage(mode, vec![path.to_string()])
    }

    pub fn clear(&mut self) {
        self.replace(ClipboardRecord::empty());
    }

    /// Paste every staged path into `destination`.
    ///
    /// Returns `AppError::Cancelled` without touching the clipboard when
    /// `cancel` fires before the requests settle.
    pub async fn paste<F>(
        &mut self,
        service: &Arc<F>,
        destination: &str,
        cancel: &CancelFlag,
    ) -> crate::error::Result<PasteReport>
    where
        F: FileService + 'static,
    {
        let mode = match self.record.mode {
            Some(mode) => mode,
            None => return Err(AppError::Validation("Clipboard is empty".into())),
        };
        cancel.check()?;

        let paths = self.record.paths.clone();
        log::info!(
            "Pasting {} path(s) into '{}' ({})",
            paths.len(),
            destination,
            mode.as_str()
        );

        let mut handles = Vec::with_capacity(paths.len());
        for path in &paths {
            let service = service.clone();
            let source = path.clone();
            let destination = destination.to_string();
            let handle = tokio::spawn(async move {
                match mode {
                    ClipboardMode::Cut => service.move_item(&source, &destination).await,
                    ClipboardMode::Copy => service.copy_item(&source, &destination).await,
                }
            });
            handles.push(handle);
        }

        let mut first_error = None;
        for (path, handle) in paths.iter().zip(handles) {
            let result = handle
                .await
                .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))
                .and_then(|r| r);
            if let Err(e) = result {
                log::warn!("Paste of '{}' into '{}' failed: {}", path, destination, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        if cancel.is_cancelled() {
            log::debug!("Discarding paste result for '{}': cancelled", destination);
            return Err(AppError::Cancelled);
        }
        if let Some(e) = first_error {
            log::error!("Paste into '{}' failed; clipboard kept", destination);
            return Err(e);
        }

        if mode == ClipboardMode::Cut {
            self.clear();
        }
        log::info!("Pasted {} path(s) into '{}'", paths.len(), destination);
        Ok(PasteReport {
            mode,
            destination: destination.to_string(),
            count: paths.len(),
        })
    }

    fn replace(&mut self, record: ClipboardRecord) {
        if let Err(e) = persist_clipboard(&self.store, &record) {
            log::warn!("Failed to persist clipboard: {}", e);
        }
        self.record = record;
    }
}
