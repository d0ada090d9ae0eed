//! Listing entry model and file-kind classification.

use std::fmt;

use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg"];
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "js", "py", "c", "cpp", "h", "hpp", "java", "cs", "php", "rb", "go", "rs",
    "swift", "kt", "ts", "tsx", "jsx", "html", "css", "xml", "log", "csv", "yml", "yaml", "sh",
    "bat", "ps1", "sql", "r", "m", "matlab", "scala", "perl", "lua", "vim", "ini", "cfg", "conf",
    "toml",
];

/// Category tag used by the listing type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    Image,
    Video,
    Audio,
    Text,
    Other,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Folder => "folder",
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Text => "text",
            FileKind::Other => "other",
        }
    }

    /// Classify an entry from its name. Directories are always `Folder`.
    pub fn classify(name: &str, is_directory: bool) -> Self {
        if is_directory {
            return FileKind::Folder;
        }
        let ext = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => return FileKind::Other,
        };
        let ext = ext.as_str();
        if IMAGE_EXTENSIONS.contains(&ext) {
            FileKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            FileKind::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            FileKind::Audio
        } else if TEXT_EXTENSIONS.contains(&ext) {
            FileKind::Text
        } else {
            FileKind::Other
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a listing snapshot. Immutable once fetched.
///
/// `size` and `modified_at` are optional because the service reports no size
/// for directories and may omit either value; sorting treats a missing value
/// as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Slash-delimited path, unique within a listing.
    pub path: String,
    pub name: String,
    pub is_directory: bool,
    /// Size in bytes.
    pub size: Option<u64>,
    /// Modification time in seconds since the Unix epoch.
    pub modified_at: Option<f64>,
    pub kind: FileKind,
}

impl FileEntry {
    pub fn file(path: &str, size: u64, modified_at: f64) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            path: path.to_string(),
            kind: FileKind::classify(&name, false),
            name,
            is_directory: false,
            size: Some(size),
            modified_at: Some(modified_at),
        }
    }

    pub fn folder(path: &str, modified_at: f64) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            path: path.to_string(),
            name,
            is_directory: true,
            size: None,
            modified_at: Some(modified_at),
            kind: FileKind::Folder,
        }
    }
}

/// Join a folder path and a child name with a single slash. An empty folder is the root.
pub fn join_path(folder: &str, name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
