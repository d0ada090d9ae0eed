//! Remote storage service abstraction.
//!
//! `FileService` is the sole interface for every request sent to the file-storage
//! service. Components in `services/` and `commands/` call through this trait and
//! never build HTTP requests themselves, so the transport can be replaced without
//! touching the state machines.
//!
//! Failures are reported as `AppError::Remote` carrying the service's message
//! verbatim. Success carries no payload beyond what a refresh needs.

use std::future::Future;
use std::sync::Arc;

use crate::error::Result;
use crate::models::details::{FileDetails, StorageStats, TextDocument};
use crate::models::file::FileEntry;
use crate::models::upload::UploadDescriptor;
use crate::services::cancel::CancelFlag;
use crate::services::progress::ProgressReporter;

#[cfg(test)]
pub mod mock;
pub mod v1;

pub trait FileService: Send + Sync {
    /// Fetch a fresh listing snapshot for `path` (empty string is the root).
    fn list_folder(&self, path: &str) -> impl Future<Output = Result<Vec<FileEntry>>> + Send;

    /// Move `source` into the folder `destination`, keeping its name.
    fn move_item(&self, source: &str, destination: &str) -> impl Future<Output = Result<()>> + Send;

    /// Copy `source` into the folder `destination`. Name collisions are the
    /// service's concern.
    fn copy_item(&self, source: &str, destination: &str) -> impl Future<Output = Result<()>> + Send;

    fn delete_one(&self, path: &str) -> impl Future<Output = Result<()>> + Send;

    /// Delete every path in one batched request.
    fn delete_many(&self, paths: &[String]) -> impl Future<Output = Result<()>> + Send;

    fn rename(&self, path: &str, new_name: &str) -> impl Future<Output = Result<()>> + Send;

    /// Create the folder at `path` (intermediate folders included).
    fn create_folder(&self, path: &str) -> impl Future<Output = Result<()>> + Send;

    fn create_file(&self, folder: &str, filename: &str) -> impl Future<Output = Result<()>> + Send;

    fn read_text(&self, path: &str) -> impl Future<Output = Result<TextDocument>> + Send;

    fn write_text(&self, path: &str, content: &str) -> impl Future<Output = Result<()>> + Send;

    /// Send every descriptor to `destination` as one multipart batch.
    ///
    /// Implementations call `progress.advance` as payload bytes are handed to
    /// the transport and check `cancel` between frames.
    fn upload(
        &self,
        destination: &str,
        files: Vec<UploadDescriptor>,
        progress: Arc<ProgressReporter>,
        cancel: CancelFlag,
    ) -> impl Future<Output = Result<()>> + Send;

    fn details(&self, path: &str) -> impl Future<Output = Result<FileDetails>> + Send;

    fn storage_stats(&self) -> impl Future<Output = Result<StorageStats>> + Send;
}
