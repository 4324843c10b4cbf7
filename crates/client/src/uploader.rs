//! The async upload driver.
//!
//! [`Uploader::run`] is the event loop around the state machine in
//! [`crate::state`]: it performs one `SendChunk` effect at a time, feeds
//! each acknowledgment back in as an event, and drains newly enqueued
//! files between sends. Because the loop awaits every send before doing
//! anything else, at most one chunk is ever in flight.

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uplink_protocol::{chunk_span, is_final_chunk, total_chunks};

use crate::error::UploadError;
use crate::progress::{FileProgress, progress_all};
use crate::queue::{FileSnapshot, UploadFile, UploadQueue};
use crate::state::{self, Action, Event, OrchestratorState};
use crate::transport::{ChunkRequest, ChunkTransport};

/// Notifications emitted while the driver runs.
///
/// Events are best-effort: if the buffer is full they are dropped, and
/// the [`Snapshot`] remains the authoritative view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// A chunk was acknowledged by the server.
    ChunkAcknowledged {
        file: String,
        chunk_index: u64,
        total_chunks: u64,
    },
    /// A file's final chunk was acknowledged.
    FileCompleted {
        file: String,
        final_filename: String,
    },
    /// Every queued file has completed; the driver is idle.
    QueueDrained,
    /// A send or read failed; the pipeline is frozen at this position.
    Stalled {
        file: String,
        chunk_index: u64,
        error: String,
    },
}

/// Read-only copy of the driver's state, refreshed after every
/// transition. Render code projects progress from this.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub files: Vec<FileSnapshot>,
    pub state: OrchestratorState,
}

/// Caller-side handle: enqueue files, read progress.
#[derive(Clone)]
pub struct UploaderHandle {
    cmd_tx: mpsc::UnboundedSender<UploadFile>,
    shared: Arc<RwLock<Snapshot>>,
}

impl UploaderHandle {
    /// Appends a file to the upload queue. Never blocks.
    pub fn enqueue(&self, file: UploadFile) {
        if self.cmd_tx.send(file).is_err() {
            warn!("uploader is gone; enqueue dropped");
        }
    }

    /// Current snapshot of queue and orchestrator state.
    pub fn snapshot(&self) -> Snapshot {
        self.shared.read().unwrap().clone()
    }

    /// Projected progress for every queued file, in order.
    pub fn progress(&self) -> Vec<FileProgress> {
        let snapshot = self.shared.read().unwrap();
        progress_all(&snapshot.files, &snapshot.state)
    }
}

/// Drives a queue of files through a [`ChunkTransport`], one chunk at a
/// time.
pub struct Uploader<T: ChunkTransport> {
    queue: UploadQueue,
    state: OrchestratorState,
    transport: T,
    pending: Option<Action>,
    cmd_rx: mpsc::UnboundedReceiver<UploadFile>,
    events_tx: mpsc::Sender<UploadEvent>,
    events_rx: Option<mpsc::Receiver<UploadEvent>>,
    shared: Arc<RwLock<Snapshot>>,
}

impl<T: ChunkTransport> Uploader<T> {
    /// Creates a driver and its caller-side handle.
    pub fn new(transport: T) -> (Self, UploaderHandle) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::channel(256);
        let shared = Arc::new(RwLock::new(Snapshot::default()));

        let uploader = Self {
            queue: UploadQueue::new(),
            state: OrchestratorState::default(),
            transport,
            pending: None,
            cmd_rx,
            events_tx,
            events_rx: Some(events_rx),
            shared: Arc::clone(&shared),
        };
        let handle = UploaderHandle { cmd_tx, shared };
        (uploader, handle)
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Runs until every handle is dropped and the queue is drained, or
    /// until the first failure.
    ///
    /// On failure the orchestrator state is left frozen at the failed
    /// `(file, chunk)` position and no further files are attempted.
    pub async fn run(mut self) -> Result<(), UploadError> {
        loop {
            while let Some(Action::SendChunk { file, chunk }) = self.pending.take() {
                match self.send_chunk(file, chunk).await {
                    Ok(next) => {
                        self.pending = next;
                    }
                    Err(e) => {
                        let name = self
                            .queue
                            .get(file)
                            .map(|f| f.name.clone())
                            .unwrap_or_default();
                        warn!(file = %name, chunk, error = %e, "upload stalled");
                        let _ = self.events_tx.try_send(UploadEvent::Stalled {
                            file: name,
                            chunk_index: chunk,
                            error: e.to_string(),
                        });
                        return Err(e);
                    }
                }

                // Pick up files enqueued while the chunk was in flight.
                while let Ok(file) = self.cmd_rx.try_recv() {
                    self.handle_enqueued(file);
                }
            }

            match self.cmd_rx.recv().await {
                Some(file) => self.handle_enqueued(file),
                None => return Ok(()),
            }
        }
    }

    fn handle_enqueued(&mut self, file: UploadFile) {
        let name = file.name.clone();
        let index = self.queue.push(file);
        debug!(file = %name, index, "file enqueued");

        if let Some(action) = state::apply(&mut self.state, &mut self.queue, Event::FileEnqueued) {
            self.pending = Some(action);
        }
        self.publish();
    }

    /// Reads one chunk, sends it, and applies the acknowledgment.
    /// Returns the next action, if any.
    async fn send_chunk(
        &mut self,
        file_index: usize,
        chunk: u64,
    ) -> Result<Option<Action>, UploadError> {
        let Some(entry) = self.queue.get_mut(file_index) else {
            return Ok(None);
        };
        let name = entry.name.clone();
        let size = entry.size;
        let total = total_chunks(size);
        let final_chunk = is_final_chunk(size, chunk);

        let (from, to) = chunk_span(size, chunk);
        let payload = entry.source.read_range(from, to)?;

        let ack = self
            .transport
            .send_chunk(ChunkRequest {
                name: name.clone(),
                size,
                chunk_index: chunk,
                total_chunks: total,
                payload,
            })
            .await?;

        if final_chunk && ack.final_filename.is_none() {
            return Err(crate::transport::TransportError::MissingFinalName.into());
        }

        let final_filename = ack.final_filename.clone();
        let next = state::apply(
            &mut self.state,
            &mut self.queue,
            Event::ChunkAcknowledged {
                final_filename: ack.final_filename,
            },
        );

        // Publish before notifying so event observers read a snapshot
        // that already reflects the acknowledgment.
        self.publish();

        debug!(file = %name, chunk, total, "chunk acknowledged");
        let _ = self.events_tx.try_send(UploadEvent::ChunkAcknowledged {
            file: name.clone(),
            chunk_index: chunk,
            total_chunks: total,
        });

        if final_chunk && let Some(final_filename) = final_filename {
            info!(file = %name, final_filename = %final_filename, "file completed");
            let _ = self.events_tx.try_send(UploadEvent::FileCompleted {
                file: name,
                final_filename,
            });
            if next.is_none() {
                let _ = self.events_tx.try_send(UploadEvent::QueueDrained);
            }
        }

        Ok(next)
    }

    fn publish(&self) {
        let mut shared = self.shared.write().unwrap();
        shared.files = self.queue.snapshot();
        shared.state = self.state;
    }
}
