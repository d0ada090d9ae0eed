//! Upload queue.
//!
//! `UploadQueue` is a cheap cloneable handle over shared queue state, so the
//! view that stages files and the task that submits them see the same queue.
//! At most one `submit` runs at a time; a second one is rejected with
//! `AppError::Busy` rather than sending the same files twice.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::UnboundedSender;

use crate::api::FileService;
use crate::error::AppError;
use crate::models::file::format_file_size;
use crate::models::upload::{UploadDescriptor, UploadProgress};
use crate::services::cancel::CancelFlag;
use crate::services::progress::ProgressReporter;

#[derive(Debug, Default)]
struct QueueState {
    items: Vec<UploadDescriptor>,
    in_flight: bool,
}

/// Outcome of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub destination: String,
    pub count: usize,
    pub total_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct UploadQueue {
    state: Arc<Mutex<QueueState>>,
    max_upload_bytes: u64,
}

/// Clears the in-flight mark when a submit ends, including when its future
/// is dropped mid-request.
struct InFlightGuard<'a> {
    state: &'a Mutex<QueueState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight = false;
    }
}

fn lock(state: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Upload target folder: a non-blank new-folder path replaces the selected
/// folder. The service creates missing folders on upload.
pub fn resolve_destination(selected_folder: &str, new_folder: Option<&str>) -> String {
    match new_folder
        .map(|name| name.trim().trim_matches('/'))
        .filter(|name| !name.is_empty())
    {
        Some(name) => name.to_string(),
        None => selected_folder.trim_matches('/').to_string(),
    }
}

impl UploadQueue {
    pub fn new(max_upload_bytes: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            max_upload_bytes,
        }
    }

    /// Append `descriptor` unless a queued item has the same name and size.
    /// Returns whether it was added.
    pub fn enqueue(&self, descriptor: UploadDescriptor) -> bool {
        let mut state = lock(&self.state);
        if state
            .items
            .iter()
            .any(|item| item.dedup_key() == descriptor.dedup_key())
        {
            log::debug!(
                "Skipping duplicate upload '{}' ({} bytes)",
                descriptor.name,
                descriptor.size
            );
            return false;
        }
        state.items.push(descriptor);
        true
    }

    /// Remove the item at `index`. Out-of-range indices are ignored.
    pub fn dequeue(&self, index: usize) -> Option<UploadDescriptor> {
        let mut state = lock(&self.state);
        if index < state.items.len() {
            Some(state.items.remove(index))
        } else {
            log::debug!(
                "Ignoring removal of upload #{} from a queue of {}",
                index,
                state.items.len()
            );
            None
        }
    }

    pub fn items(&self) -> Vec<UploadDescriptor> {
        lock(&self.state).items.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).items.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).items.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        lock(&self.state).items.iter().map(|item| item.size).sum()
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.state).in_flight
    }

    /// Drop every staged descriptor. A batch already in flight is unaffected.
    pub fn clear(&self) -> usize {
        let mut state = lock(&self.state);
        let dropped = state.items.len();
        state.items.clear();
        dropped
    }

    /// Send the whole queue to `destination` as one batch.
    ///
    /// Progress fractions go to `progress_tx`, starting at 0.0 and ending at
    /// 1.0 on success. On success the submitted items leave the queue. On
    /// failure or cancellation the queue is unchanged.
    pub async fn submit<F: FileService>(
        &self,
        service: &F,
        destination: &str,
        progress_tx: Option<UnboundedSender<UploadProgress>>,
        cancel: &CancelFlag,
    ) -> crate::error::Result<UploadReport> {
        let batch = {
            let mut state = lock(&self.state);
            if state.in_flight {
                log::warn!("Rejecting upload to '{}': another upload is in progress", destination);
                return Err(AppError::Busy("An upload is already in progress".into()));
            }
            if state.items.is_empty() {
                return Err(AppError::no_files_selected());
            }
            let total: u64 = state.items.iter().map(|item| item.size).sum();
            if total > self.max_upload_bytes {
                return Err(AppError::Validation(format!(
                    "Upload of {} exceeds the {} limit",
                    format_file_size(total),
                    format_file_size(self.max_upload_bytes)
                )));
            }
            cancel.check()?;
            state.in_flight = true;
            state.items.clone()
        };
        let _guard = InFlightGuard { state: &self.state };

        let count = batch.len();
        let total_bytes: u64 = batch.iter().map(|item| item.size).sum();
        let submitted: HashSet<String> = batch.iter().map(|item| item.id.clone()).collect();
        log::info!(
            "Uploading {} file(s) ({}) to '{}'",
            count,
            format_file_size(total_bytes),
            destination
        );

        let progress = Arc::new(ProgressReporter::new(total_bytes, progress_tx));
        progress.start();
        let result = service
            .upload(destination, batch, progress.clone(), cancel.clone())
            .await;

        if cancel.is_cancelled() {
            log::debug!("Discarding upload result for '{}': cancelled", destination);
            return Err(AppError::Cancelled);
        }
        if let Err(e) = result {
            log::error!("Upload to '{}' failed: {}", destination, e);
            return Err(e);
        }

        lock(&self.state)
            .items
            .retain(|item| !submitted.contains(&item.id));
        progress.complete();
        log::info!("Uploaded {} file(s) to '{}'", count, destination);
        Ok(UploadReport {
            destination: destination.to_string(),
            count,
            total_bytes,
        })
    }
}
