//! Chunk transport trait and HTTP implementation.
//!
//! Using a trait keeps the orchestrator decoupled from the wire and
//! testable with mocks; [`HttpChunkTransport`] is the production
//! implementation over reqwest.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;
use uplink_protocol::{ChunkUploadParams, ChunkUploadResponse};

/// Default endpoint receiving chunk POSTs, relative to the base URL.
pub const DEFAULT_UPLOAD_PATH: &str = "/api/v1/upload";

/// Default path under which the server serves reassembled files.
pub const DEFAULT_FILES_PATH: &str = "/uploads";

/// One chunk ready for the wire: metadata plus payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    pub name: String,
    pub size: u64,
    pub chunk_index: u64,
    pub total_chunks: u64,
    pub payload: Vec<u8>,
}

/// Server acknowledgment of one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkAck {
    /// Present on the final chunk: name of the reassembled file as served.
    pub final_filename: Option<String>,
}

/// Errors produced while sending a chunk.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("final chunk acknowledged without finalFilename")]
    MissingFinalName,
}

/// Abstract channel carrying one chunk to the server.
///
/// Implementations do not retry; a failed send surfaces as an error and
/// the caller's pipeline stalls.
pub trait ChunkTransport: Send + Sync {
    /// Sends one chunk and waits for the server's acknowledgment.
    fn send_chunk(
        &self,
        request: ChunkRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ChunkAck, TransportError>> + Send + '_>>;
}

/// HTTP chunk transport: one POST per chunk.
///
/// Metadata travels as query parameters, the chunk bytes as a raw
/// `application/octet-stream` body. The base URL is external
/// configuration; the endpoint paths default to [`DEFAULT_UPLOAD_PATH`]
/// and [`DEFAULT_FILES_PATH`].
pub struct HttpChunkTransport {
    http: reqwest::Client,
    base_url: String,
    upload_path: String,
    files_path: String,
}

impl HttpChunkTransport {
    /// Creates a transport posting to `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.into(),
            files_path: DEFAULT_FILES_PATH.into(),
        }
    }

    /// Overrides the upload endpoint path.
    pub fn with_upload_path(mut self, path: impl Into<String>) -> Self {
        self.upload_path = path.into();
        self
    }

    /// Overrides the served-files path.
    pub fn with_files_path(mut self, path: impl Into<String>) -> Self {
        self.files_path = path.into();
        self
    }

    /// Address where a completed file is served, keyed by its
    /// server-assigned final name.
    pub fn download_url(&self, final_filename: &str) -> String {
        format!("{}{}/{final_filename}", self.base_url, self.files_path)
    }

    fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, self.upload_path)
    }

    async fn post_chunk(&self, request: ChunkRequest) -> Result<ChunkAck, TransportError> {
        let ChunkRequest {
            name,
            size,
            chunk_index,
            total_chunks,
            payload,
        } = request;
        let params = ChunkUploadParams {
            name,
            size,
            current_chunk_index: chunk_index,
            total_chunks,
        };

        debug!(
            file = %params.name,
            chunk = chunk_index,
            total = total_chunks,
            bytes = payload.len(),
            "sending chunk"
        );

        let response = self
            .http
            .post(self.upload_url())
            .query(&params)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let ack: ChunkUploadResponse = response.json().await?;
        Ok(ChunkAck {
            final_filename: ack.final_filename,
        })
    }
}

impl ChunkTransport for HttpChunkTransport {
    fn send_chunk(
        &self,
        request: ChunkRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ChunkAck, TransportError>> + Send + '_>> {
        Box::pin(self.post_chunk(request))
    }
}
