//! Upload queue descriptors and progress events.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

/// Handle to the bytes of a picked file. Owned by whoever picked the file;
/// the queue only holds a cheap clone.
#[derive(Clone)]
pub enum UploadPayload {
    /// File on local disk, read in chunks at submit time.
    Disk(PathBuf),
    /// Bytes already in memory (drag-and-drop, camera capture).
    Memory(Arc<Vec<u8>>),
}

impl std::fmt::Debug for UploadPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadPayload::Disk(path) => f.debug_tuple("Disk").field(path).finish(),
            UploadPayload::Memory(bytes) => write!(f, "Memory({} bytes)", bytes.len()),
        }
    }
}

/// A file staged for upload.
#[derive(Debug, Clone)]
pub struct UploadDescriptor {
    /// Queue-local identity (UUID v4 hex, 32 chars).
    pub id: String,
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    pub payload: UploadPayload,
}

impl UploadDescriptor {
    pub fn new(name: impl Into<String>, size: u64, payload: UploadPayload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: name.into(),
            size,
            payload,
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::new(name, size, UploadPayload::Memory(Arc::new(bytes)))
    }

    /// Describe a file on local disk. The name is the file name component.
    pub fn from_path(path: impl Into<PathBuf>) -> crate::error::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                crate::error::AppError::Validation(format!("Not a file: {}", path.display()))
            })?;
        Ok(Self::new(name, size, UploadPayload::Disk(path)))
    }

    /// Name and size together: the duplicate-suppression key.
    pub fn dedup_key(&self) -> (&str, u64) {
        (self.name.as_str(), self.size)
    }
}

/// A contiguous byte range of one payload, sent as one body frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub chunk_index: u32,
    pub offset: u64,
    pub size: u64,
}

/// Progress event for a batch upload. `fraction` is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub total_bytes: u64,
    pub fraction: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_sets_size() {
        let d = UploadDescriptor::from_bytes("a.txt", vec![0u8; 42]);
        assert_eq!(d.size, 42);
        assert_eq!(d.dedup_key(), ("a.txt", 42));
    }

    #[test]
    fn test_ids_are_unique_hex() {
        let a = UploadDescriptor::from_bytes("a.txt", vec![]);
        let b = UploadDescriptor::from_bytes("a.txt", vec![]);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_progress_serde_camel_case() {
        let p = UploadProgress {
            bytes_sent: 5,
            total_bytes: 10,
            fraction: 0.5,
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"bytesSent\""));
        assert!(json.contains("\"totalBytes\""));
    }

    #[test]
    fn test_from_path_reads_size_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        let d = UploadDescriptor::from_path(&path).unwrap();
        assert_eq!(d.name, "notes.txt");
        assert_eq!(d.size, 5);
        assert!(matches!(d.payload, UploadPayload::Disk(_)));
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            UploadDescriptor::from_path(dir.path().join("absent.bin")),
            Err(crate::error::AppError::Io(_))
        ));
    }

    #[test]
    fn test_memory_payload_debug_omits_bytes() {
        let d = UploadDescriptor::from_bytes("a.bin", vec![7u8; 4096]);
        assert_eq!(format!("{:?}", d.payload), "Memory(4096 bytes)");
    }
}
