//! Wire contract for the uplink chunked-upload protocol.
//!
//! One HTTP POST per chunk: metadata travels as URL query parameters
//! ([`messages::ChunkUploadParams`]), the chunk bytes are the raw request
//! body, and the server answers with JSON
//! ([`messages::ChunkUploadResponse`]). Chunk boundaries are pure
//! arithmetic over the file size ([`chunks`]) and are never stored.

pub mod chunks;
pub mod messages;

pub use chunks::{CHUNK_SIZE, chunk_span, is_final_chunk, total_chunks};
pub use messages::{ChunkUploadParams, ChunkUploadResponse};
