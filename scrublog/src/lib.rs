//! # scrublog
//!
//! A structured logger that redacts sensitive data before it is emitted.
//!
//! Callers attach typed key/value context and an optional error to a logger;
//! the redaction engine deep-copies every attached value through an ordered
//! filter chain, and finalized records flow through a hook pipeline to a
//! single emitter, optionally behind a bounded async queue.
//!
//! ## Features
//!
//! - **Type-preserving redaction**: `#[derive(Redact)]` values are cloned
//!   field by field, masking what the filter chain flags, never mutating
//!   the caller's data
//! - **Immutable context chain**: `with`/`err` return new logger values;
//!   sharing a logger across threads needs no locking
//! - **Hook pipeline**: pre-, error- and post-hooks with strict ordering
//! - **Async delivery**: a bounded queue and a single drain worker, with
//!   backpressure instead of dropped records
//!
//! ## Example
//!
//! ```
//! use scrublog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .filter(FieldFilter::new("password"))
//!     .emitter(ConsoleEmitter::new().with_colors(false))
//!     .build()
//!     .expect("valid configuration");
//!
//! logger
//!     .with("user", String::from("alice"))
//!     .with("password", String::from("hunter2")) // emitted as "[filtered]"
//!     .info("signed in");
//! ```

pub mod core;
pub mod emit;
pub mod macros;
pub mod redact;

// Lets derive-generated `::scrublog` paths resolve inside this crate.
#[allow(unused_extern_crates)]
extern crate self as scrublog;

/// Sentinel written in place of masked textual values.
pub const FILTERED_LABEL: &str = "[filtered]";

pub mod prelude {
    pub use crate::core::{
        ErrorNormalizer, Frame, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError,
        MetadataNormalizer, NormalizedError, Result, TracedError,
    };
    pub use crate::emit::{ConsoleEmitter, Emitter, JsonEmitter};
    pub use crate::redact::{
        FieldFilter, FieldPrefixFilter, Filter, FilterChain, PatternFilter, Redact, TagFilter,
        TypeFilter, ValueFilter,
    };
    pub use crate::FILTERED_LABEL;
}

pub use crate::core::{
    ErrorNormalizer, Frame, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerError,
    MetadataNormalizer, NormalizedError, Result, TracedError,
};
pub use crate::emit::{ConsoleEmitter, Emitter, JsonEmitter};
pub use crate::redact::{Filter, FilterChain, Redact};
