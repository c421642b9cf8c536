//! The logger: immutable context chain, level gate and record dispatch.

use super::{
    error::{LoggerError, Result},
    level::LogLevel,
    pipeline::{ErrorHook, Hook, Pipeline},
    record::LogRecord,
    report::{ErrorNormalizer, MetadataNormalizer},
};
use crate::emit::{AsyncQueue, ConsoleEmitter, Emitter};
use crate::redact::{Filter, FilterChain, Redact};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Clock function used to stamp records; substitutable for deterministic
/// tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Write-once configuration shared by every clone of a logger tree. Nothing
/// in here is mutated after construction, which is what makes concurrent use
/// of cloned loggers safe without locking.
struct Shared {
    min_level: LogLevel,
    filters: FilterChain,
    clock: Clock,
    normalizer: Arc<dyn ErrorNormalizer>,
    pipeline: Arc<Pipeline>,
    queue: Option<AsyncQueue>,
}

/// A redacting structured logger.
///
/// A `Logger` value is immutable: [`with`](Self::with) and
/// [`err`](Self::err) return a new logger with an extended context snapshot,
/// sharing the write-once configuration. Clones are cheap and each snapshot
/// is owned exclusively by the logger value that produced it.
///
/// # Example
///
/// ```
/// use scrublog::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .emitter(ConsoleEmitter::new().with_colors(false))
///     .build()
///     .expect("valid configuration");
///
/// let request_logger = logger.with("request_id", String::from("abc-123"));
/// request_logger.debug("handling request");
/// ```
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    values: BTreeMap<String, serde_json::Value>,
    error: Option<super::report::NormalizedError>,
}

impl Logger {
    /// Default logger: info level, console emitter, no filters.
    pub fn new() -> Self {
        LoggerBuilder::new()
            .build()
            .expect("default configuration is valid")
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Returns a new logger whose snapshot additionally maps `key` to a
    /// redacted copy of `value`.
    ///
    /// The value is deep-copied through the filter chain under `key` as its
    /// field name; with no filters configured the engine is skipped and the
    /// value is captured as-is. A later `with` on the same key overwrites
    /// the earlier entry. Values that fail to serialize are recorded as
    /// their serde error text rather than failing the log call.
    #[must_use]
    pub fn with<T>(&self, key: impl Into<String>, value: T) -> Logger
    where
        T: Redact + Serialize,
    {
        let key = key.into();
        let captured = if self.shared.filters.is_empty() {
            capture(&value)
        } else {
            capture(&value.redact(&self.shared.filters, &key, ""))
        };

        let mut child = self.clone();
        child.values.insert(key, captured);
        child
    }

    /// Returns a new logger carrying the normalized form of `error`.
    ///
    /// The report's key/values run through the redaction engine when filters
    /// are configured.
    #[must_use]
    pub fn err<E>(&self, error: E) -> Logger
    where
        E: StdError + 'static,
    {
        let mut report = self.shared.normalizer.normalize(&error);
        if report.kind.is_empty() {
            report.kind = std::any::type_name::<E>().to_owned();
        }
        if !self.shared.filters.is_empty() {
            let masked = report
                .values
                .iter()
                .map(|(key, value)| (key.clone(), value.redact(&self.shared.filters, key, "")))
                .collect();
            report.values = masked;
        }

        let mut child = self.clone();
        child.error = Some(report);
        child
    }

    /// True when `level` clears the configured minimum.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.shared.min_level
    }

    /// Gates, stamps and dispatches one record.
    ///
    /// The level gate runs before anything else. The `log!`-family macros
    /// additionally gate before `format!`, so discarded records never pay
    /// for message formatting.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.enabled(level) {
            return;
        }

        let record = LogRecord {
            level,
            timestamp: (self.shared.clock)(),
            message: message.into(),
            values: self.values.clone(),
            error: self.error.clone(),
        };

        match &self.shared.queue {
            Some(queue) => queue.send(Arc::clone(&self.shared.pipeline), record),
            None => self.shared.pipeline.dispatch(&record),
        }
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Drains the async queue and shuts its worker down.
    ///
    /// Only meaningful for loggers built with
    /// [`async_mode`](LoggerBuilder::async_mode); a synchronous logger has
    /// nothing to flush and returns immediately. Blocks until every queued
    /// record has been emitted — there is no timeout, so a stuck emitter
    /// stalls the flush. Flushing twice, or logging afterwards, is a
    /// contract violation and panics.
    pub fn flush(&self) {
        if let Some(queue) = &self.shared.queue {
            queue.flush();
        }
    }

    /// Read access to the current snapshot values.
    pub fn values(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.values
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.shared.min_level)
            .field("filters", &self.shared.filters.len())
            .field("values", &self.values)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

fn capture<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| serde_json::Value::String(format!("<unserializable: {e}>")))
}

/// Builder for constructing a [`Logger`] with a fluent API.
///
/// # Example
///
/// ```
/// use scrublog::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level_name("debug")
///     .filter(FieldFilter::new("password"))
///     .emitter(JsonEmitter::new())
///     .build()
///     .expect("valid configuration");
/// # let _ = logger;
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    level_name: Option<String>,
    filters: FilterChain,
    emitter: Option<Arc<dyn Emitter>>,
    clock: Clock,
    normalizer: Arc<dyn ErrorNormalizer>,
    pre_hooks: Vec<Hook>,
    error_hooks: Vec<ErrorHook>,
    post_hooks: Vec<Hook>,
    queue_size: Option<usize>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            level_name: None,
            filters: FilterChain::new(),
            emitter: None,
            clock: Arc::new(Utc::now),
            normalizer: Arc::new(MetadataNormalizer),
            pre_hooks: Vec::new(),
            error_hooks: Vec::new(),
            post_hooks: Vec::new(),
            queue_size: None,
        }
    }

    /// Set the minimum log level.
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the minimum log level by name, case-insensitively.
    ///
    /// Parsing happens in [`build`](Self::build); an unknown name fails
    /// construction with [`LoggerError::InvalidLevel`].
    #[must_use = "builder methods return a new value"]
    pub fn min_level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    /// Append a filter to the redaction chain.
    #[must_use = "builder methods return a new value"]
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(filter);
        self
    }

    /// Replace the emitter. Defaults to [`ConsoleEmitter`].
    #[must_use = "builder methods return a new value"]
    pub fn emitter<E: Emitter + 'static>(mut self, emitter: E) -> Self {
        self.emitter = Some(Arc::new(emitter));
        self
    }

    /// Replace the clock used to stamp records.
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the error-normalization collaborator.
    #[must_use = "builder methods return a new value"]
    pub fn normalizer(mut self, normalizer: impl ErrorNormalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Register a hook that runs before every emission.
    #[must_use = "builder methods return a new value"]
    pub fn pre_hook(mut self, hook: impl Fn(&LogRecord) + Send + Sync + 'static) -> Self {
        self.pre_hooks.push(Arc::new(hook));
        self
    }

    /// Register a hook that runs when the emitter fails.
    #[must_use = "builder methods return a new value"]
    pub fn error_hook(
        mut self,
        hook: impl Fn(&LoggerError, &LogRecord) + Send + Sync + 'static,
    ) -> Self {
        self.error_hooks.push(Arc::new(hook));
        self
    }

    /// Register a hook that runs after every emission, success or failure.
    #[must_use = "builder methods return a new value"]
    pub fn post_hook(mut self, hook: impl Fn(&LogRecord) + Send + Sync + 'static) -> Self {
        self.post_hooks.push(Arc::new(hook));
        self
    }

    /// Defer delivery through a bounded queue of `queue_size` records and a
    /// single drain worker. A full queue blocks the caller rather than
    /// dropping records.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, queue_size: usize) -> Self {
        self.queue_size = Some(queue_size);
        self
    }

    /// Build the logger, validating the configuration.
    pub fn build(self) -> Result<Logger> {
        let mut min_level = self.min_level;
        if let Some(name) = self.level_name {
            min_level = name.parse()?;
        }

        let pipeline = Arc::new(Pipeline {
            emitter: self
                .emitter
                .unwrap_or_else(|| Arc::new(ConsoleEmitter::new())),
            pre_hooks: self.pre_hooks,
            error_hooks: self.error_hooks,
            post_hooks: self.post_hooks,
        });

        Ok(Logger {
            shared: Arc::new(Shared {
                min_level,
                filters: self.filters,
                clock: self.clock,
                normalizer: self.normalizer,
                pipeline,
                queue: self.queue_size.map(AsyncQueue::new),
            }),
            values: BTreeMap::new(),
            error: None,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
