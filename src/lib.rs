//! Client-side orchestration core for a remote file manager.
//!
//! A `commands::Session` owns the per-session state (listing snapshot, view
//! controls, clipboard, bulk selection, upload queue) and routes each
//! `commands::Command` to the component that handles it. Remote operations go
//! through `api::FileService`; durable state goes through
//! `storage::KeyValueStore`. The crate uses the `log` facade and installs no
//! logger of its own.

pub mod api;
pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use commands::{Command, Outcome, Session};
pub use error::{AppError, Result};
