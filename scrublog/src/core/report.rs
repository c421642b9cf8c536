//! Normalized error reports attached to log records.
//!
//! The pipeline treats errors opaquely: an [`ErrorNormalizer`] turns any
//! `std::error::Error` into a [`NormalizedError`] carrying the cause chain,
//! stack frames and contextual key/values. Errors without metadata degrade
//! to an empty stack and value set.

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

/// One resolved stack frame.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

/// A normalized view of an error value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedError {
    /// Top-level error message.
    pub message: String,
    /// Concrete type name of the original error.
    pub kind: String,
    /// Messages of the `source()` chain, outermost first.
    pub causes: Vec<String>,
    /// Stack captured where the error was constructed, when available.
    pub frames: Vec<Frame>,
    /// Contextual key/values attached to the error, redacted before they
    /// reach a record.
    pub values: BTreeMap<String, serde_json::Value>,
}

/// Turns arbitrary error values into [`NormalizedError`]s.
///
/// A custom normalizer can lift metadata off application-specific error
/// types; leave `kind` empty to have the logger fill in the concrete type
/// name.
pub trait ErrorNormalizer: Send + Sync {
    fn normalize(&self, error: &(dyn StdError + 'static)) -> NormalizedError;
}

/// Default normalizer: walks the `source()` chain and lifts frames and
/// key/values off [`TracedError`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataNormalizer;

impl ErrorNormalizer for MetadataNormalizer {
    fn normalize(&self, error: &(dyn StdError + 'static)) -> NormalizedError {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        let (frames, values) = match error.downcast_ref::<TracedError>() {
            Some(traced) => (traced.frames().to_vec(), traced.values().clone()),
            None => (Vec::new(), BTreeMap::new()),
        };

        NormalizedError {
            message: error.to_string(),
            kind: String::new(),
            causes,
            frames,
            values,
        }
    }
}

/// An error carrying contextual key/values and the stack captured at
/// construction time.
///
/// [`MetadataNormalizer`] recognizes this type and surfaces its metadata in
/// log records; any other error type works too, just without frames and
/// values.
///
/// ```
/// use scrublog::TracedError;
///
/// let err = TracedError::new("connection reset").with_value("peer", "10.0.0.7");
/// assert_eq!(err.to_string(), "connection reset");
/// ```
#[derive(Debug)]
pub struct TracedError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    values: BTreeMap<String, serde_json::Value>,
    frames: Vec<Frame>,
}

impl TracedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            values: BTreeMap::new(),
            frames: capture_frames(),
        }
    }

    /// Wraps an underlying error, keeping it reachable through `source()`.
    pub fn wrap(
        source: impl StdError + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
            values: BTreeMap::new(),
            frames: capture_frames(),
        }
    }

    /// Attaches a contextual key/value pair to the error.
    ///
    /// Values that fail to serialize are recorded as their serde error text.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| serde_json::Value::String(format!("<unserializable: {e}>")));
        self.values.insert(key.into(), value);
        self
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn values(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.values
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for TracedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Resolves the current call stack into structured frames, skipping the
/// capture machinery itself.
fn capture_frames() -> Vec<Frame> {
    let trace = backtrace::Backtrace::new();
    let mut frames = Vec::new();
    for frame in trace.frames() {
        for symbol in frame.symbols() {
            let function = match symbol.name() {
                Some(name) => name.to_string(),
                None => continue,
            };
            if function.starts_with("backtrace::")
                || function.contains("capture_frames")
                || function.contains("TracedError")
            {
                continue;
            }
            frames.push(Frame {
                function,
                file: symbol
                    .filename()
                    .map(|path| path.display().to_string())
                    .unwrap_or_default(),
                line: symbol.lineno().unwrap_or(0),
            });
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traced_error_carries_values() {
        let err = TracedError::new("boom")
            .with_value("user_id", 42)
            .with_value("peer", "10.0.0.7");

        assert_eq!(err.values()["user_id"], serde_json::json!(42));
        assert_eq!(err.values()["peer"], serde_json::json!("10.0.0.7"));
    }

    #[test]
    fn test_normalizer_walks_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let outer = TracedError::wrap(inner, "flush failed");

        let report = MetadataNormalizer.normalize(&outer);
        assert_eq!(report.message, "flush failed");
        assert_eq!(report.causes, vec!["pipe closed".to_owned()]);
    }

    #[test]
    fn test_normalizer_degrades_for_plain_errors() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let report = MetadataNormalizer.normalize(&err);

        assert_eq!(report.message, "missing");
        assert!(report.frames.is_empty());
        assert!(report.values.is_empty());
    }
}
