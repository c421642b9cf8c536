//! Emitters: the sinks finalized records are handed to.

mod async_queue;
mod console;
mod json;

pub use console::ConsoleEmitter;
pub use json::JsonEmitter;

pub(crate) use async_queue::AsyncQueue;

use crate::core::{LogRecord, Result};

/// A log output destination.
///
/// `emit` is synchronous and may fail; failures are routed to the logger's
/// error-hooks, never back to the log-call site. Implementations must not
/// retain the record beyond the call.
pub trait Emitter: Send + Sync {
    fn emit(&self, record: &LogRecord) -> Result<()>;
    fn name(&self) -> &str;
}
