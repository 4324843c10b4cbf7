//! Byte-range chunk reading from opaque sources.
//!
//! The upload flow asks for one range at a time via
//! [`ChunkSource::read_range`]; sources are lazy and keep no state across
//! calls beyond their underlying handle.

mod source;

pub use source::{ChunkSource, FileSource, MemorySource};

/// Errors produced while reading chunk data from a source.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
