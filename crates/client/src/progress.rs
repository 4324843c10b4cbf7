//! Progress projection.
//!
//! A pure read of orchestrator state. Nothing here is stored, so the
//! displayed value can never diverge from the queue.

use uplink_protocol::total_chunks;

use crate::queue::FileSnapshot;
use crate::state::OrchestratorState;

/// Projected display state for one queued file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileProgress {
    /// 0–100. Exactly 100 if and only if the file is done.
    pub percent: u8,
    /// Set once the server has assigned the file's final name.
    pub done: bool,
}

/// Projects progress for the file at `index` in the queue.
///
/// A zero-byte file shows 0 until its conventional chunk is acknowledged,
/// then jumps to 100.
pub fn project(file: &FileSnapshot, index: usize, state: &OrchestratorState) -> FileProgress {
    if file.final_name.is_some() {
        return FileProgress {
            percent: 100,
            done: true,
        };
    }

    if state.active_file() == Some(index)
        && let Some(chunk) = state.active_chunk()
    {
        let total = total_chunks(file.size);
        let percent = if total == 0 {
            0
        } else {
            ((chunk as f64 / total as f64) * 100.0).round() as u8
        };
        return FileProgress {
            percent,
            done: false,
        };
    }

    FileProgress {
        percent: 0,
        done: false,
    }
}

/// Projects the whole queue, in order.
pub fn progress_all(files: &[FileSnapshot], state: &OrchestratorState) -> Vec<FileProgress> {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| project(file, index, state))
        .collect()
}
