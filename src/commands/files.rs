//! Folder navigation and single-file operations.

use crate::api::FileService;
use crate::error::AppError;
use crate::models::file::join_path;
use crate::services::cancel::CancelFlag;
use crate::storage::KeyValueStore;

use super::{Outcome, Session};

/// Trimmed `name`, or a validation error naming `what` when it is blank.
fn required<'a>(name: &'a str, what: &str) -> crate::error::Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        Err(AppError::Validation(format!("{} is required", what)))
    } else {
        Ok(name)
    }
}

impl<F: FileService + 'static, K: KeyValueStore> Session<F, K> {
    /// Browse to `path`. Work still in flight for the previous folder is
    /// cancelled and its results discarded. Bulk mode ends and the upload
    /// queue is emptied, as a page reload would.
    pub async fn navigate(&mut self, path: &str) -> crate::error::Result<Outcome> {
        let path = path.trim_matches('/').to_string();
        self.cancel.cancel();
        self.cancel = CancelFlag::new();

        let entries = self.service.list_folder(&path).await?;
        log::info!("Navigated to '{}' ({} entries)", path, entries.len());
        self.current_path = path;
        self.selection.exit_bulk_mode();
        let dropped = self.uploads.clear();
        if dropped > 0 {
            log::info!("Discarded {} queued upload(s)", dropped);
        }
        self.replace_snapshot(entries);
        Ok(Outcome::View(self.view()))
    }

    pub(super) async fn new_folder(&mut self, name: &str) -> crate::error::Result<Outcome> {
        let name = required(name, "Folder name")?;
        let path = join_path(&self.current_path, name);
        self.service.create_folder(&path).await?;
        Ok(self.toast_with_refresh("Folder created").await)
    }

    pub(super) async fn new_file(&mut self, filename: &str) -> crate::error::Result<Outcome> {
        let filename = required(filename, "File name")?;
        self.service
            .create_file(&self.current_path, filename)
            .await?;
        Ok(self.toast_with_refresh("File created").await)
    }

    pub(super) async fn rename(
        &mut self,
        path: &str,
        new_name: &str,
    ) -> crate::error::Result<Outcome> {
        let new_name = required(new_name, "New name")?;
        self.service.rename(path, new_name).await?;
        Ok(self.toast_with_refresh("Renamed").await)
    }

    pub(super) async fn delete(&mut self, path: &str) -> crate::error::Result<Outcome> {
        self.service.delete_one(path).await?;
        Ok(self.toast_with_refresh("Item deleted").await)
    }

    /// Move one path into `destination` (the move dialog).
    pub(super) async fn move_to(
        &mut self,
        path: &str,
        destination: &str,
    ) -> crate::error::Result<Outcome> {
        let destination = destination.trim_matches('/');
        self.service.move_item(path, destination).await?;
        Ok(self.toast_with_refresh("Moved successfully").await)
    }

    pub(super) async fn open_text(&mut self, path: &str) -> crate::error::Result<Outcome> {
        let document = self.service.read_text(path).await?;
        Ok(Outcome::Text(document))
    }

    pub(super) async fn save_text(
        &mut self,
        path: &str,
        content: &str,
    ) -> crate::error::Result<Outcome> {
        self.service.write_text(path, content).await?;
        Ok(self.toast_with_refresh("File saved").await)
    }

    pub(super) async fn details(&mut self, path: &str) -> crate::error::Result<Outcome> {
        let details = self.service.details(path).await?;
        Ok(Outcome::Details(details))
    }

    pub(super) async fn stats(&mut self) -> crate::error::Result<Outcome> {
        let stats = self.service.storage_stats().await?;
        Ok(Outcome::Stats(stats))
    }
}
