//! The upload queue and its entries.

use std::path::Path;

use uplink_transfer::{ChunkSource, FileSource, MemorySource, TransferError};

/// A queued unit of upload work.
///
/// `final_name` is written exactly once, when the server acknowledges the
/// file's final chunk. Entries persist as completed records for the rest
/// of the session.
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    pub(crate) source: Box<dyn ChunkSource>,
    pub final_name: Option<String>,
}

impl UploadFile {
    /// Wraps an arbitrary chunk source; `size` is taken from the source.
    pub fn new(name: impl Into<String>, source: Box<dyn ChunkSource>) -> Self {
        Self {
            name: name.into(),
            size: source.len(),
            source,
            final_name: None,
        }
    }

    /// Queues in-memory bytes.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(name, Box::new(MemorySource::new(data)))
    }

    /// Queues a file on disk, named after its file name.
    pub fn from_path(path: &Path) -> Result<Self, TransferError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self::new(name, Box::new(FileSource::open(path)?)))
    }

    /// Read-only view for progress projection.
    pub fn snapshot(&self) -> FileSnapshot {
        FileSnapshot {
            name: self.name.clone(),
            size: self.size,
            final_name: self.final_name.clone(),
        }
    }
}

/// Read-only view of a queue entry, safe to hand to render code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    pub name: String,
    pub size: u64,
    pub final_name: Option<String>,
}

/// Ordered, append-only sequence of upload files.
///
/// Insertion order is upload priority order. Indices are stable for the
/// life of the queue; entries are never reordered or removed.
#[derive(Default)]
pub struct UploadQueue {
    files: Vec<UploadFile>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file and returns its index.
    pub fn push(&mut self, file: UploadFile) -> usize {
        self.files.push(file);
        self.files.len() - 1
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&UploadFile> {
        self.files.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut UploadFile> {
        self.files.get_mut(index)
    }

    /// Snapshots every entry, in queue order.
    pub fn snapshot(&self) -> Vec<FileSnapshot> {
        self.files.iter().map(UploadFile::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_stable_indices() {
        let mut queue = UploadQueue::new();
        assert!(queue.is_empty());

        let a = queue.push(UploadFile::from_bytes("a.bin", vec![0; 10]));
        let b = queue.push(UploadFile::from_bytes("b.bin", vec![0; 20]));
        assert_eq!((a, b), (0, 1));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(0).map(|f| f.name.as_str()), Some("a.bin"));
        assert_eq!(queue.get(1).map(|f| f.name.as_str()), Some("b.bin"));
    }

    #[test]
    fn from_bytes_sets_size_from_data() {
        let file = UploadFile::from_bytes("a.bin", vec![1, 2, 3]);
        assert_eq!(file.size, 3);
        assert_eq!(file.final_name, None);
    }

    #[test]
    fn snapshot_reflects_final_name() {
        let mut queue = UploadQueue::new();
        queue.push(UploadFile::from_bytes("a.bin", vec![0; 5]));

        let before = queue.snapshot();
        assert_eq!(before[0].final_name, None);

        queue.get_mut(0).unwrap().final_name = Some("a123.bin".into());
        let after = queue.snapshot();
        assert_eq!(after[0].final_name.as_deref(), Some("a123.bin"));
        assert_eq!(after[0].size, 5);
    }
}
