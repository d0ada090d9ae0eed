use serde::{Deserialize, Serialize};

/// Default storage service address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
/// Streamed upload read size: 64 KiB.
pub const DEFAULT_UPLOAD_CHUNK_SIZE: u64 = 65_536;
/// Largest batch the service accepts: 5 GiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Client configuration persisted to a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Base URL of the storage service.
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub upload_timeout_secs: u64,
    pub upload_chunk_size: u64,
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: 30,
            upload_timeout_secs: 3600,
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK_SIZE,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// User preferences kept in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
}
