//! Bulk-selection tracker.

use crate::api::FileService;
use crate::error::AppError;
use crate::models::clipboard::ClipboardMode;
use crate::models::file::FileEntry;

/// Selected paths handed from the selection to the clipboard. The selection
/// itself is left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPaths {
    pub mode: ClipboardMode,
    pub paths: Vec<String>,
}

/// Checked rows while bulk mode is active.
///
/// Invariant: `paths` is empty whenever `bulk_mode` is false, and holds each
/// path once in the order it was checked.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    bulk_mode: bool,
    paths: Vec<String>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bulk_mode(&self) -> bool {
        self.bulk_mode
    }

    pub fn enter_bulk_mode(&mut self) {
        self.bulk_mode = true;
    }

    /// Leave bulk mode. The selection is always cleared.
    pub fn exit_bulk_mode(&mut self) {
        self.bulk_mode = false;
        self.paths.clear();
    }

    pub fn toggle_bulk_mode(&mut self) {
        if self.bulk_mode {
            self.exit_bulk_mode();
        } else {
            self.enter_bulk_mode();
        }
    }

    /// Flip membership of `path`. Ignored outside bulk mode.
    /// Returns whether the path is selected afterwards.
    pub fn toggle(&mut self, path: &str) -> bool {
        if !self.bulk_mode {
            return false;
        }
        match self.paths.iter().position(|p| p == path) {
            Some(index) => {
                self.paths.remove(index);
                false
            }
            None => {
                self.paths.push(path.to_string());
                true
            }
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Snapshot the selection for the clipboard.
    pub fn as_clipboard_stage(&self, mode: ClipboardMode) -> crate::error::Result<StagedPaths> {
        if self.paths.is_empty() {
            return Err(AppError::no_files_selected());
        }
        Ok(StagedPaths {
            mode,
            paths: self.paths.clone(),
        })
    }

    /// Drop selected paths that are not in the new listing snapshot.
    /// Returns how many were dropped.
    pub fn prune(&mut self, listing: &[FileEntry]) -> usize {
        let before = self.paths.len();
        self.paths
            .retain(|path| listing.iter().any(|entry| &entry.path == path));
        let dropped = before - self.paths.len();
        if dropped > 0 {
            log::debug!("Pruned {} stale selected path(s)", dropped);
        }
        dropped
    }

    /// Delete every selected path in one batched request.
    ///
    /// On success the selection is consumed (bulk mode stays on) and the number
    /// of deleted paths is returned. On failure the selection is kept.
    pub async fn bulk_delete<S: FileService>(
        &mut self,
        service: &S,
    ) -> crate::error::Result<usize> {
        if self.paths.is_empty() {
            return Err(AppError::no_files_selected());
        }
        let count = self.paths.len();
        log::info!("Bulk deleting {} path(s)", count);
        match service.delete_many(&self.paths).await {
            Ok(()) => {
                self.paths.clear();
                Ok(count)
            }
            Err(e) => {
                log::warn!("Bulk delete of {} path(s) failed: {}", count, e);
                Err(e)
            }
        }
    }
}
