use serde::{Deserialize, Serialize};

/// Out-of-band metadata for one chunk upload.
///
/// Serialized as URL query parameters (camelCase keys); the chunk bytes
/// themselves are the `application/octet-stream` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkUploadParams {
    /// File name as queued on the client (unique within a queue).
    pub name: String,
    /// Total file size in bytes.
    pub size: u64,
    /// 0-based index of this chunk.
    pub current_chunk_index: u64,
    /// `ceil(size / CHUNK_SIZE)`; 0 for a zero-byte file.
    pub total_chunks: u64,
}

/// Server acknowledgment for one chunk.
///
/// `finalFilename` is present on the final chunk of a file and names the
/// reassembled file as the server will serve it. Intermediate chunks are
/// not required to carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkUploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_filename: Option<String>,
}
