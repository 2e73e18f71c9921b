//! Multipart upload client with byte-level progress reporting.
//!
//! The file body is fed to reqwest as a chunked stream; every chunk handed to
//! the connection advances the reported byte count.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use shared::settings::UploadSettings;
use shared::{FileSource, SelectedFile, TransferResponse, UploadError};
use std::sync::Arc;
use std::time::Duration;

/// Callback receiving `(loaded, total)` byte counts.
pub type ProgressFn = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// A single file submission.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub url: String,
    pub field_name: String,
    pub file: SelectedFile,
    pub chunk_size: usize,
}

impl UploadRequest {
    pub fn new(settings: &UploadSettings, file: SelectedFile) -> Self {
        Self {
            url: settings.endpoint_url(),
            field_name: settings.field_name.clone(),
            file,
            chunk_size: settings.chunk_size,
        }
    }
}

/// Anything that can carry a file to the server.
///
/// Non-2xx statuses are returned as responses; only failures to talk to the
/// server at all (or to read the file) are errors.
#[async_trait::async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: ProgressFn,
    ) -> Result<TransferResponse, UploadError>;
}

/// reqwest-backed transport.
pub struct HttpUploader {
    http: Client,
}

impl HttpUploader {
    pub fn new(settings: &UploadSettings) -> Result<Self, UploadError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| UploadError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

async fn read_content(source: &FileSource) -> Result<Bytes, UploadError> {
    match source {
        FileSource::Memory(bytes) => Ok(bytes.clone()),
        FileSource::Path(path) => tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|source| UploadError::ReadFile {
                path: path.clone(),
                source,
            }),
    }
}

/// Byte ranges of `len` split into `chunk_size` pieces.
fn chunk_ranges(len: usize, chunk_size: usize) -> impl Iterator<Item = std::ops::Range<usize>> {
    let step = chunk_size.max(1);
    (0..len).step_by(step).map(move |start| start..(start + step).min(len))
}

/// Wrap `content` in a body stream that reports cumulative bytes as chunks are pulled.
///
/// Chunks are views into `content`; the file bytes are never copied.
fn progress_body(content: Bytes, chunk_size: usize, progress: ProgressFn) -> Body {
    let total = content.len() as u64;
    let ranges: Vec<_> = chunk_ranges(content.len(), chunk_size).collect();

    let mut loaded = 0u64;
    let body = stream::iter(ranges).map(move |range| {
        let chunk = content.slice(range);
        loaded += chunk.len() as u64;
        progress(loaded, Some(total));
        Ok::<_, std::io::Error>(chunk)
    });

    Body::wrap_stream(body)
}

#[async_trait::async_trait]
impl UploadTransport for HttpUploader {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: ProgressFn,
    ) -> Result<TransferResponse, UploadError> {
        let content = read_content(&request.file.source).await?;
        let total = content.len() as u64;
        let media_type = request
            .file
            .media_type
            .clone()
            .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string());

        let part = Part::stream_with_length(progress_body(content, request.chunk_size, progress), total)
            .file_name(request.file.name.clone())
            .mime_str(&media_type)
            .map_err(|e| UploadError::Network(format!("invalid media type {}: {}", media_type, e)))?;
        let form = Form::new().part(request.field_name.clone(), part);

        tracing::info!(url = %request.url, file = %request.file.name, bytes = total, "Uploading");

        let resp = self
            .http
            .post(&request.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let response = TransferResponse::new(resp.status().as_u16(), resp.url().to_string());
        tracing::debug!(status = response.status, url = %response.url, "Upload answered");
        Ok(response)
    }
}
