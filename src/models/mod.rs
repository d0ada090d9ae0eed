//! Data models shared across the client.
//!
//! Listing entries, the clipboard record, upload descriptors, listing view state,
//! service detail payloads and configuration types.

pub mod clipboard;
pub mod details;
pub mod file;
pub mod listing;
pub mod settings;
pub mod upload;
