//! Bounded-queue async delivery.
//!
//! A single background worker drains records in FIFO order and runs the
//! emission pipeline synchronously per record, so delivery order equals
//! enqueue order and at most one emission is in flight at a time.

use crate::core::pipeline::Pipeline;
use crate::core::LogRecord;
use crossbeam_channel::{bounded, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;

struct Job {
    pipeline: Arc<Pipeline>,
    record: LogRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueueState {
    /// Accepting records.
    Open,
    /// Flush requested; no new records accepted while draining.
    Closing,
    /// Drained and shut down. Terminal.
    Drained,
}

struct Inner {
    state: QueueState,
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

pub(crate) struct AsyncQueue {
    inner: Mutex<Inner>,
}

impl AsyncQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded::<Job>(capacity);
        let worker = std::thread::spawn(move || {
            for job in receiver {
                job.pipeline.dispatch(&job.record);
            }
        });

        Self {
            inner: Mutex::new(Inner {
                state: QueueState::Open,
                sender: Some(sender),
                worker: Some(worker),
            }),
        }
    }

    /// Blocking enqueue: a full queue applies backpressure to the caller
    /// instead of dropping the record.
    ///
    /// Panics when called after `flush` — logging on a closed queue is a
    /// programming error.
    pub(crate) fn send(&self, pipeline: Arc<Pipeline>, record: LogRecord) {
        let inner = self.inner.lock();
        match inner.state {
            QueueState::Open => {}
            QueueState::Closing | QueueState::Drained => {
                panic!("scrublog: log emitted after flush() on an async logger");
            }
        }

        if let Some(sender) = inner.sender.as_ref() {
            // Blocks while the queue is full; the worker never takes this
            // lock, so it keeps draining. A closed channel means the worker
            // died mid-dispatch (a hook panic), which is a caller bug.
            let _ = sender.send(Job { pipeline, record });
        }
    }

    /// Stops intake and blocks until the worker has drained the queue and
    /// exited. No timeout: a stuck emitter stalls the flush.
    ///
    /// Panics on a second call.
    pub(crate) fn flush(&self) {
        let (sender, worker) = {
            let mut inner = self.inner.lock();
            match inner.state {
                QueueState::Open => {}
                QueueState::Closing | QueueState::Drained => {
                    panic!("scrublog: flush() called twice on an async logger");
                }
            }
            inner.state = QueueState::Closing;
            (inner.sender.take(), inner.worker.take())
        };

        // Dropping the sender closes the channel; the worker drains what is
        // queued and exits.
        drop(sender);
        if let Some(worker) = worker {
            let _ = worker.join();
        }

        self.inner.lock().state = QueueState::Drained;
    }
}

impl Drop for AsyncQueue {
    /// Best-effort drain when the logger is dropped without an explicit
    /// flush.
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        if inner.state != QueueState::Open {
            return;
        }
        inner.state = QueueState::Drained;
        inner.sender.take();
        if let Some(worker) = inner.worker.take() {
            let _ = worker.join();
        }
    }
}
