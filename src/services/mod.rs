//! Business logic layer.
//!
//! The state-owning components of a browsing session (clipboard, bulk
//! selection, upload queue) and the listing filter/sort engine, plus the
//! progress and cancellation plumbing they share. Called by the `commands`
//! layer; reaches the remote service only through `api::FileService` and local
//! durability only through `storage::KeyValueStore`.

pub mod cancel;
pub mod chunk_manager;
pub mod clipboard;
pub mod listing;
pub mod progress;
pub mod selection;
pub mod upload_queue;
