use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::TransferError;

/// An opaque readable byte source of known length.
///
/// `read_range` produces exactly one payload per call and clamps the
/// requested range to the source's actual end, so asking past EOF (the
/// final short chunk) never errors.
pub trait ChunkSource: Send {
    /// Total length of the source in bytes.
    fn len(&self) -> u64;

    /// Returns `true` if the source has no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the bytes of `[from, to_exclusive)`, clamped to the end.
    fn read_range(&mut self, from: u64, to_exclusive: u64) -> Result<Vec<u8>, TransferError>;
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// In-memory chunk source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl ChunkSource for MemorySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_range(&mut self, from: u64, to_exclusive: u64) -> Result<Vec<u8>, TransferError> {
        let len = self.data.len() as u64;
        let from = from.min(len) as usize;
        let to = to_exclusive.min(len) as usize;
        Ok(self.data[from..to.max(from)].to_vec())
    }
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// File-backed chunk source.
///
/// The file size is captured at open time; ranges are served with a seek
/// and a bounded read.
pub struct FileSource {
    file: std::fs::File,
    len: u64,
}

impl FileSource {
    /// Opens `path` for chunked reading.
    pub fn open(path: &Path) -> Result<Self, TransferError> {
        let file = std::fs::File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }
}

impl ChunkSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_range(&mut self, from: u64, to_exclusive: u64) -> Result<Vec<u8>, TransferError> {
        let from = from.min(self.len);
        let to = to_exclusive.min(self.len).max(from);
        if to == from {
            return Ok(Vec::new());
        }

        self.file.seek(SeekFrom::Start(from))?;
        let mut buf = Vec::with_capacity((to - from) as usize);
        self.file.by_ref().take(to - from).read_to_end(&mut buf)?;
        Ok(buf)
    }
}
