//! The orchestrator state machine.
//!
//! Two external events exist: a file was enqueued, and the in-flight chunk
//! was acknowledged. Every other transition (activate next file, advance
//! chunk) is a deterministic consequence computed inside [`apply`], which
//! returns the single effect to perform (send one chunk) or nothing.

use uplink_protocol::is_final_chunk;

use crate::queue::UploadQueue;

/// Sequencing state owned by the orchestrator.
///
/// `active_chunk` is meaningful only while `active_file` is set. At most
/// one chunk transmission is derived from this state at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorState {
    active_file: Option<usize>,
    last_completed: Option<usize>,
    active_chunk: Option<u64>,
}

impl OrchestratorState {
    /// Index of the file currently being uploaded, if any.
    pub fn active_file(&self) -> Option<usize> {
        self.active_file
    }

    /// Index of the most recently completed file, if any.
    pub fn last_completed(&self) -> Option<usize> {
        self.last_completed
    }

    /// Index of the chunk currently in flight within the active file.
    pub fn active_chunk(&self) -> Option<u64> {
        self.active_chunk
    }

    /// Returns `true` when no file is being uploaded.
    pub fn is_idle(&self) -> bool {
        self.active_file.is_none()
    }
}

/// External events driving the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A file was appended to the queue.
    FileEnqueued,
    /// The in-flight chunk was acknowledged by the server.
    ChunkAcknowledged { final_filename: Option<String> },
}

/// The effect a transition asks the driver to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Transmit chunk `chunk` of queue entry `file`.
    SendChunk { file: usize, chunk: u64 },
}

/// Applies one event and returns the effect to perform, if any.
///
/// Acknowledging the final chunk (index `total - 1`, or index 0 of a
/// zero-byte file) records the server-assigned name on the entry, marks
/// the file completed, and activates the next queued file. Activation
/// always targets `last_completed + 1`, so files complete strictly in
/// enqueue order.
pub fn apply(
    state: &mut OrchestratorState,
    queue: &mut UploadQueue,
    event: Event,
) -> Option<Action> {
    match event {
        Event::FileEnqueued => {
            if state.active_file.is_some() {
                return None;
            }
            activate_next(state, queue)
        }
        Event::ChunkAcknowledged { final_filename } => {
            let file = state.active_file?;
            let chunk = state.active_chunk?;
            let size = queue.get(file)?.size;

            if is_final_chunk(size, chunk) {
                if let Some(entry) = queue.get_mut(file) {
                    entry.final_name = final_filename;
                }
                state.last_completed = Some(file);
                state.active_file = None;
                state.active_chunk = None;
                activate_next(state, queue)
            } else {
                let next = chunk + 1;
                state.active_chunk = Some(next);
                Some(Action::SendChunk { file, chunk: next })
            }
        }
    }
}

/// Activates the file after the last completed one, if it exists.
fn activate_next(state: &mut OrchestratorState, queue: &UploadQueue) -> Option<Action> {
    let next = state.last_completed.map_or(0, |i| i + 1);
    if next >= queue.len() {
        return None;
    }
    state.active_file = Some(next);
    state.active_chunk = Some(0);
    Some(Action::SendChunk {
        file: next,
        chunk: 0,
    })
}
