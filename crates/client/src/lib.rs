//! Client upload flow: queue, orchestrator, transport, progress.
//!
//! This crate implements the **client side** of chunked file upload. It is
//! a library crate with no UI dependencies; the embedding app enqueues
//! files and renders projected progress.
//!
//! # Pipeline
//!
//! 1. **Enqueue**: files are appended to an append-only [`UploadQueue`]
//! 2. **Activate**: the orchestrator picks the next incomplete file
//! 3. **Send**: one 10 KiB chunk at a time through a [`ChunkTransport`]
//! 4. **Advance**: each acknowledgment triggers the next chunk, or the
//!    next file once the final chunk lands
//!
//! At most one chunk is in flight at any time, system-wide. A failed send
//! or read stalls the pipeline at the current `(file, chunk)` position;
//! there is no automatic retry.

pub mod error;
pub mod progress;
pub mod queue;
pub mod state;
pub mod transport;
pub mod uploader;

// Re-export primary types for convenience.
pub use error::UploadError;
pub use progress::{FileProgress, progress_all, project};
pub use queue::{FileSnapshot, UploadFile, UploadQueue};
pub use state::{Action, Event, OrchestratorState};
pub use transport::{ChunkAck, ChunkRequest, ChunkTransport, HttpChunkTransport, TransportError};
pub use uploader::{Snapshot, UploadEvent, Uploader, UploaderHandle};
