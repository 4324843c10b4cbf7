//! Upload error types.

use crate::transport::TransportError;

/// Errors that stall the upload pipeline.
///
/// Neither variant is retried: the orchestrator stays frozen at the
/// current `(file, chunk)` position and attempts no further files.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("read error: {0}")]
    Read(#[from] uplink_transfer::TransferError),
}
