//! Emission pipeline: ordered hooks around a single emitter.

use super::error::LoggerError;
use super::record::LogRecord;
use crate::emit::Emitter;
use std::sync::Arc;

/// Callback observing a record at a fixed pipeline stage.
pub type Hook = Arc<dyn Fn(&LogRecord) + Send + Sync>;

/// Callback receiving an emission failure together with the record.
pub type ErrorHook = Arc<dyn Fn(&LoggerError, &LogRecord) + Send + Sync>;

/// Write-once emission stage shared by every clone of a logger: the emitter
/// plus the hook lists, in registration order.
///
/// In async mode a reference to this stage travels through the queue with
/// each record, so hooks run on the drain worker.
pub(crate) struct Pipeline {
    pub(crate) emitter: Arc<dyn Emitter>,
    pub(crate) pre_hooks: Vec<Hook>,
    pub(crate) error_hooks: Vec<ErrorHook>,
    pub(crate) post_hooks: Vec<Hook>,
}

impl Pipeline {
    /// Runs one record through the pipeline: pre-hooks, then the emitter,
    /// error-hooks only on failure, post-hooks always and last.
    ///
    /// Emission failures stop here: they are handed to the error-hooks and
    /// never returned to the log-call site. Nothing is retried.
    pub(crate) fn dispatch(&self, record: &LogRecord) {
        for hook in &self.pre_hooks {
            hook(record);
        }

        if let Err(error) = self.emitter.emit(record) {
            for hook in &self.error_hooks {
                hook(&error, record);
            }
        }

        for hook in &self.post_hooks {
            hook(record);
        }
    }
}
