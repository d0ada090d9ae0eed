//! Detail and statistics payloads returned by the storage service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata for a single file or folder. Folder-only fields are absent for files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    pub name: String,
    /// "File" or "Folder".
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable size as formatted by the service.
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folders: Option<u64>,
    pub ctime: String,
    pub mtime: String,
}

/// Aggregate usage across the whole storage root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageStats {
    pub total_size: String,
    pub total_size_bytes: u64,
    pub file_count: u64,
    pub folder_count: u64,
    /// Top extensions by count.
    #[serde(default)]
    pub file_types: BTreeMap<String, u64>,
}

/// Text file contents returned for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDocument {
    pub name: String,
    pub content: String,
}
