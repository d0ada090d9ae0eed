//! HttpFileService: `FileService` over the storage service's HTTP routes.
//!
//! Form-encoded routes: `/move`, `/copy`, `/rename`. JSON routes: `/bulk-delete`,
//! `/create-folder`, `/create-file`, `/save-text`. Path-suffixed GET routes:
//! `/delete/<p>`, `/read-text/<p>`, `/details/<p>`. Listings come from
//! `/list?path=<p>` as an array of `{name, path, is_dir, mtime, size}` items.
//! Uploads are one multipart POST to `/upload` with a `target` field and one
//! `files` part per queued descriptor.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use super::FileService;
use crate::error::AppError;
use crate::models::details::{FileDetails, StorageStats, TextDocument};
use crate::models::file::{FileEntry, FileKind};
use crate::models::settings::AppConfig;
use crate::models::upload::{Chunk, UploadDescriptor, UploadPayload};
use crate::services::cancel::CancelFlag;
use crate::services::chunk_manager;
use crate::services::progress::ProgressReporter;

const USER_AGENT: &str = "fileops-client/0.1.0";

pub struct HttpFileService {
    client: reqwest::Client,
    upload_client: reqwest::Client,
    base_url: Url,
    chunk_size: u64,
}

/// Listing item as the service reports it. `mtime` and `size` are accepted as
/// numbers or numeric strings; anything else is treated as missing.
#[derive(Debug, Deserialize)]
struct ListedItem {
    name: String,
    path: String,
    #[serde(default)]
    is_dir: bool,
    #[serde(default)]
    mtime: Option<Value>,
    #[serde(default)]
    size: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReadTextResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpFileService {
    pub fn new(config: &AppConfig) -> crate::error::Result<Self> {
        let base_url = Url::parse(&config.server_url)
            .map_err(|e| AppError::Internal(format!("Invalid server URL: {}", e)))?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        let upload_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.upload_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build upload client: {}", e)))?;
        Ok(Self {
            client,
            upload_client,
            base_url,
            chunk_size: config.upload_chunk_size,
        })
    }

    /// `<base>/<route>/<path segments>`, percent-encoding each segment.
    pub(crate) fn route_url(&self, route: &str, path: Option<&str>) -> crate::error::Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Internal("Server URL cannot be a base".into()))?;
            segments.pop_if_empty().push(route);
            if let Some(path) = path {
                segments.extend(path.split('/').filter(|s| !s.is_empty()));
            }
        }
        Ok(url)
    }

    fn to_entry(item: ListedItem) -> FileEntry {
        let size = item
            .size
            .as_ref()
            .and_then(numeric_value)
            .filter(|s| *s >= 0.0)
            .map(|s| s as u64);
        let modified_at = item.mtime.as_ref().and_then(numeric_value);
        FileEntry {
            kind: FileKind::classify(&item.name, item.is_dir),
            path: item.path,
            name: item.name,
            is_directory: item.is_dir,
            size: if item.is_dir { None } else { size },
            modified_at,
        }
    }

    async fn post_form(&self, route: &str, form: &[(&str, &str)]) -> crate::error::Result<()> {
        let resp = self
            .client
            .post(self.route_url(route, None)?)
            .form(form)
            .send()
            .await?;
        ensure_success(resp).await.map(|_| ())
    }

    async fn post_json(&self, route: &str, body: Value) -> crate::error::Result<()> {
        let resp = self
            .client
            .post(self.route_url(route, None)?)
            .json(&body)
            .send()
            .await?;
        ensure_success(resp).await.map(|_| ())
    }
}

impl FileService for HttpFileService {
    async fn list_folder(&self, path: &str) -> crate::error::Result<Vec<FileEntry>> {
        let resp = self
            .client
            .get(self.route_url("list", None)?)
            .query(&[("path", path)])
            .send()
            .await?;
        let items: Vec<ListedItem> = ensure_success(resp).await?.json().await?;
        Ok(items.into_iter().map(Self::to_entry).collect())
    }

    async fn move_item(&self, source: &str, destination: &str) -> crate::error::Result<()> {
        self.post_form("move", &[("source", source), ("dest", destination)])
            .await
    }

    async fn copy_item(&self, source: &str, destination: &str) -> crate::error::Result<()> {
        self.post_form("copy", &[("source", source), ("dest", destination)])
            .await
    }

    async fn delete_one(&self, path: &str) -> crate::error::Result<()> {
        let resp = self
            .client
            .get(self.route_url("delete", Some(path))?)
            .send()
            .await?;
        ensure_success(resp).await.map(|_| ())
    }

    async fn delete_many(&self, paths: &[String]) -> crate::error::Result<()> {
        self.post_json("bulk-delete", json!({ "paths": paths })).await
    }

    async fn rename(&self, path: &str, new_name: &str) -> crate::error::Result<()> {
        self.post_form("rename", &[("old", path), ("new", new_name)])
            .await
    }

    async fn create_folder(&self, path: &str) -> crate::error::Result<()> {
        self.post_json("create-folder", json!({ "path": path })).await
    }

    async fn create_file(&self, folder: &str, filename: &str) -> crate::error::Result<()> {
        self.post_json(
            "create-file",
            json!({ "folder": folder, "filename": filename }),
        )
        .await
    }

    async fn read_text(&self, path: &str) -> crate::error::Result<TextDocument> {
        let resp = self
            .client
            .get(self.route_url("read-text", Some(path))?)
            .send()
            .await?;
        // Errors arrive as a JSON body with an `error` field; auth failures as plain text.
        let status = resp.status();
        let text = resp.text().await?;
        let body: ReadTextResponse = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(AppError::Remote(remote_message(status.as_u16(), &text)))
            }
            Err(e) => return Err(AppError::Api(format!("Malformed read-text response: {}", e))),
        };
        if let Some(error) = body.error {
            return Err(AppError::Remote(error));
        }
        match (body.name, body.content) {
            (Some(name), Some(content)) => Ok(TextDocument { name, content }),
            _ => Err(AppError::Api("read-text response missing content".into())),
        }
    }

    async fn write_text(&self, path: &str, content: &str) -> crate::error::Result<()> {
        self.post_json("save-text", json!({ "path": path, "content": content }))
            .await
    }

    async fn upload(
        &self,
        destination: &str,
        files: Vec<UploadDescriptor>,
        progress: Arc<ProgressReporter>,
        cancel: CancelFlag,
    ) -> crate::error::Result<()> {
        let mut form = Form::new().text("target", destination.to_string());
        for file in files {
            let size = file.size;
            let stream = payload_stream(
                file.payload,
                chunk_manager::plan_chunks(size, self.chunk_size),
                progress.clone(),
                cancel.clone(),
            );
            let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), size)
                .file_name(file.name)
                .mime_str("application/octet-stream")
                .map_err(|e| AppError::Internal(format!("MIME parse error: {}", e)))?;
            form = form.part("files", part);
        }

        let result = self
            .upload_client
            .post(self.route_url("upload", None)?)
            .multipart(form)
            .send()
            .await;
        // A body aborted by the cancel flag surfaces as a transport error.
        cancel.check()?;
        ensure_success(result?).await.map(|_| ())
    }

    async fn details(&self, path: &str) -> crate::error::Result<FileDetails> {
        let resp = self
            .client
            .get(self.route_url("details", Some(path))?)
            .send()
            .await?;
        Ok(ensure_success(resp).await?.json().await?)
    }

    async fn storage_stats(&self) -> crate::error::Result<StorageStats> {
        let resp = self
            .client
            .get(self.route_url("storage-stats", None)?)
            .send()
            .await?;
        Ok(ensure_success(resp).await?.json().await?)
    }
}

/// Pass 2xx responses through; turn anything else into `AppError::Remote`
/// with the server's text (or its JSON `error` field) verbatim.
async fn ensure_success(resp: Response) -> crate::error::Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    Err(AppError::Remote(remote_message(status.as_u16(), &text)))
}

pub(crate) fn remote_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(error)) = map.get("error") {
            return error.clone();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        body.to_string()
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Body stream for one payload. Each frame advances `progress` as it is handed
/// to the transport; a raised cancel flag ends the stream with an error.
fn payload_stream(
    payload: UploadPayload,
    chunks: Vec<Chunk>,
    progress: Arc<ProgressReporter>,
    cancel: CancelFlag,
) -> impl futures::Stream<Item = crate::error::Result<Vec<u8>>> + Send + 'static {
    futures::stream::iter(chunks).then(move |chunk| {
        let payload = payload.clone();
        let progress = progress.clone();
        let cancel = cancel.clone();
        async move {
            cancel.check()?;
            let data = read_payload_chunk(&payload, chunk).await?;
            progress.advance(data.len() as u64);
            Ok::<_, AppError>(data)
        }
    })
}

/// Read one frame of a payload.
///
/// Disk reads use spawn_blocking to avoid blocking the tokio runtime.
pub async fn read_payload_chunk(
    payload: &UploadPayload,
    chunk: Chunk,
) -> crate::error::Result<Vec<u8>> {
    match payload {
        UploadPayload::Memory(bytes) => {
            let start = (chunk.offset as usize).min(bytes.len());
            let end = (start + chunk.size as usize).min(bytes.len());
            Ok(bytes[start..end].to_vec())
        }
        UploadPayload::Disk(path) => {
            let path = path.clone();
            tokio::task::spawn_blocking(move || {
                use std::io::{Read, Seek, SeekFrom};
                let mut file = std::fs::File::open(&path)?;
                file.seek(SeekFrom::Start(chunk.offset))?;
                let mut buf = Vec::with_capacity(chunk.size as usize);
                file.take(chunk.size).read_to_end(&mut buf)?;
                Ok::<_, AppError>(buf)
            })
            .await
            .map_err(|e| AppError::Internal(format!("spawn_blocking join error: {}", e)))?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn service() -> HttpFileService {
        HttpFileService::new(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_server_url() {
        let config = AppConfig {
            server_url: "not a url".into(),
            ..AppConfig::default()
        };
        match HttpFileService::new(&config) {
            Err(AppError::Internal(msg)) => assert!(msg.contains("Invalid server URL")),
            Err(other) => panic!("Expected AppError::Internal, got: {:?}", other),
            Ok(_) => panic!("Expected an error"),
        }
    }

    #[test]
    fn test_route_url_encodes_path_segments() {
        let url = service()
            .route_url("details", Some("docs/My Report.pdf"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/details/docs/My%20Report.pdf"
        );
    }

    #[test]
    fn test_route_url_under_base_path() {
        let config = AppConfig {
            server_url: "http://nas.local/files/".into(),
            ..AppConfig::default()
        };
        let svc = HttpFileService::new(&config).unwrap();
        let url = svc.route_url("move", None).unwrap();
        assert_eq!(url.as_str(), "http://nas.local/files/move");
    }

    #[test]
    fn test_to_entry_file_item() {
        let item: ListedItem = serde_json::from_str(
            r#"{"name":"Report.pdf","path":"docs/Report.pdf","is_dir":false,"mtime":1700000000.5,"size":2048}"#,
        )
        .unwrap();
        let entry = HttpFileService::to_entry(item);
        assert_eq!(entry.path, "docs/Report.pdf");
        assert_eq!(entry.size, Some(2048));
        assert_eq!(entry.modified_at, Some(1700000000.5));
        assert!(!entry.is_directory);
    }

    #[test]
    fn test_to_entry_folder_has_no_size() {
        let item: ListedItem = serde_json::from_str(
            r#"{"name":"img","path":"img","is_dir":true,"mtime":1.0,"size":-1}"#,
        )
        .unwrap();
        let entry = HttpFileService::to_entry(item);
        assert!(entry.is_directory);
        assert_eq!(entry.kind, FileKind::Folder);
        assert!(entry.size.is_none());
    }

    #[test]
    fn test_to_entry_tolerates_unparseable_values() {
        let item: ListedItem = serde_json::from_str(
            r#"{"name":"a.txt","path":"a.txt","mtime":"yesterday","size":"12"}"#,
        )
        .unwrap();
        let entry = HttpFileService::to_entry(item);
        assert!(entry.modified_at.is_none());
        assert_eq!(entry.size, Some(12));
    }

    #[test]
    fn test_remote_message_plain_text() {
        assert_eq!(
            remote_message(409, "File or folder already exists in destination"),
            "File or folder already exists in destination"
        );
    }

    #[test]
    fn test_remote_message_json_error_field() {
        assert_eq!(
            remote_message(400, r#"{"error":"File is not a text file"}"#),
            "File is not a text file"
        );
    }

    #[test]
    fn test_remote_message_empty_body() {
        assert_eq!(remote_message(500, "  "), "Request failed with status 500");
    }

    #[tokio::test]
    async fn test_read_payload_chunk_from_memory() {
        let payload = UploadPayload::Memory(Arc::new((0u8..10).collect()));
        let chunk = Chunk {
            chunk_index: 1,
            offset: 3,
            size: 4,
        };
        let data = read_payload_chunk(&payload, chunk).await.unwrap();
        assert_eq!(data, vec![3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_read_payload_chunk_from_disk_at_file_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.bin");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            f.write_all(&[10, 20, 30, 40, 50]).unwrap();
        }
        let chunk = Chunk {
            chunk_index: 0,
            offset: 3,
            size: 100,
        };
        let data = read_payload_chunk(&UploadPayload::Disk(path), chunk)
            .await
            .unwrap();
        assert_eq!(data, vec![40, 50]);
    }

    #[tokio::test]
    async fn test_read_payload_chunk_file_not_found() {
        let chunk = Chunk {
            chunk_index: 0,
            offset: 0,
            size: 10,
        };
        let result =
            read_payload_chunk(&UploadPayload::Disk("/nonexistent/file.bin".into()), chunk).await;
        match result {
            Err(AppError::Io(_)) => {}
            other => panic!("Expected AppError::Io, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_payload_stream_advances_progress_per_frame() {
        let payload = UploadPayload::Memory(Arc::new(vec![1u8; 10]));
        let progress = Arc::new(ProgressReporter::silent(10));
        let stream = payload_stream(
            payload,
            chunk_manager::plan_chunks(10, 4),
            progress.clone(),
            CancelFlag::new(),
        );
        let frames: Vec<_> = stream.collect().await;
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.is_ok()));
        assert_eq!(progress.bytes_sent(), 10);
    }

    #[tokio::test]
    async fn test_payload_stream_stops_when_cancelled() {
        let payload = UploadPayload::Memory(Arc::new(vec![1u8; 10]));
        let progress = Arc::new(ProgressReporter::silent(10));
        let cancel = CancelFlag::new();
        cancel.cancel();
        let stream = payload_stream(
            payload,
            chunk_manager::plan_chunks(10, 4),
            progress.clone(),
            cancel,
        );
        let frames: Vec<_> = stream.collect().await;
        assert!(matches!(frames[0], Err(AppError::Cancelled)));
        assert_eq!(progress.bytes_sent(), 0);
    }
}
