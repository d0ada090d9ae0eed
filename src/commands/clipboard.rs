//! Clipboard and bulk-selection commands.

use crate::api::FileService;
use crate::models::clipboard::ClipboardMode;
use crate::storage::KeyValueStore;

use super::{Outcome, Session};

impl<F: FileService + 'static, K: KeyValueStore> Session<F, K> {
    pub(super) fn copy_path(&mut self, path: &str) -> crate::error::Result<Outcome> {
        self.clipboard.stage_one(ClipboardMode::Copy, path)?;
        Ok(Outcome::toast("Copied! Navigate to a folder, then paste"))
    }

    pub(super) fn cut_path(&mut self, path: &str) -> crate::error::Result<Outcome> {
        self.clipboard.stage_one(ClipboardMode::Cut, path)?;
        Ok(Outcome::toast("Cut! Navigate to a folder, then paste"))
    }

    /// Paste the clipboard into the current folder.
    pub(super) async fn paste(&mut self) -> crate::error::Result<Outcome> {
        let cancel = self.cancel.clone();
        let report = self
            .clipboard
            .paste(&self.service, &self.current_path, &cancel)
            .await?;
        Ok(self.toast_with_refresh(report.message()).await)
    }

    pub(super) fn clear_clipboard(&mut self) -> Outcome {
        self.clipboard.clear();
        Outcome::toast("Clipboard cleared")
    }

    pub(super) fn clipboard_status(&self) -> Outcome {
        Outcome::toast(format!("{} items in clipboard", self.clipboard.record().len()))
    }

    pub(super) fn toggle_bulk_mode(&mut self) -> Outcome {
        self.selection.toggle_bulk_mode();
        Outcome::Done
    }

    pub(super) fn cancel_bulk(&mut self) -> Outcome {
        self.selection.exit_bulk_mode();
        Outcome::Done
    }

    /// Paths missing from the current listing are ignored.
    pub(super) fn toggle_select(&mut self, path: &str) -> Outcome {
        if self.snapshot.iter().any(|entry| entry.path == path) {
            self.selection.toggle(path);
        } else {
            log::debug!("Ignoring selection of '{}', not in the listing", path);
        }
        Outcome::Done
    }

    pub(super) fn bulk_copy(&mut self) -> crate::error::Result<Outcome> {
        let staged = self.selection.as_clipboard_stage(ClipboardMode::Copy)?;
        let record = self.clipboard.stage_selection(staged)?;
        Ok(Outcome::toast(format!("Copied {} item(s)", record.len())))
    }

    pub(super) fn bulk_cut(&mut self) -> crate::error::Result<Outcome> {
        let staged = self.selection.as_clipboard_stage(ClipboardMode::Cut)?;
        let record = self.clipboard.stage_selection(staged)?;
        Ok(Outcome::toast(format!(
            "Cut {} item(s)! Navigate to a folder, then paste",
            record.len()
        )))
    }

    pub(super) async fn bulk_delete(&mut self) -> crate::error::Result<Outcome> {
        self.selection.bulk_delete(&*self.service).await?;
        Ok(self.toast_with_refresh("Items deleted").await)
    }
}
