//! Upload queue commands.

use crate::api::FileService;
use crate::models::file::format_file_size;
use crate::models::upload::UploadDescriptor;
use crate::services::upload_queue::resolve_destination;
use crate::storage::KeyValueStore;

use super::{Outcome, Session};

impl<F: FileService + 'static, K: KeyValueStore> Session<F, K> {
    /// Stage a picked file. Duplicates (same name and size) are dropped.
    pub(super) fn queue_upload(&mut self, descriptor: UploadDescriptor) -> Outcome {
        let label = format!("{} ({})", descriptor.name, format_file_size(descriptor.size));
        if self.uploads.enqueue(descriptor) {
            Outcome::toast(format!("Queued {}", label))
        } else {
            Outcome::Done
        }
    }

    pub(super) fn remove_upload(&mut self, index: usize) -> Outcome {
        self.uploads.dequeue(index);
        Outcome::Done
    }

    /// Submit the queue to `target_folder` (the current folder when absent),
    /// or to `new_folder` when one is named.
    pub(super) async fn start_upload(
        &mut self,
        target_folder: Option<&str>,
        new_folder: Option<&str>,
    ) -> crate::error::Result<Outcome> {
        let selected = target_folder.unwrap_or(&self.current_path);
        let destination = resolve_destination(selected, new_folder);
        let cancel = self.cancel.clone();
        self.uploads
            .submit(&*self.service, &destination, self.progress_tx.clone(), &cancel)
            .await?;
        Ok(self.toast_with_refresh("Upload complete").await)
    }
}
