//! One-line JSON emitter.

use super::Emitter;
use crate::core::error::LoggerError;
use crate::core::{Frame, LogRecord, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Serializes each record as a single JSON object per line (JSONL),
/// compatible with log aggregation tooling.
pub struct JsonEmitter {
    time_format: String,
    pretty: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEmitter {
    pub fn new() -> Self {
        Self {
            time_format: "%Y-%m-%dT%H:%M:%S%.6f".to_owned(),
            pretty: false,
            writer: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// Indent output instead of emitting one line per record.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set a strftime-compatible timestamp format.
    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Redirect output, e.g. to a file handle or a capture buffer in tests.
    #[must_use]
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }
}

impl Default for JsonEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire shape of one emitted record.
#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: &'a str,
    msg: &'a str,
    #[serde(skip_serializing_if = "map_is_empty")]
    values: &'a BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError<'a>>,
}

#[derive(Serialize)]
struct JsonError<'a> {
    msg: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "slice_is_empty")]
    causes: &'a [String],
    #[serde(skip_serializing_if = "frames_are_empty")]
    stacktrace: &'a [Frame],
    #[serde(skip_serializing_if = "map_is_empty")]
    values: &'a BTreeMap<String, serde_json::Value>,
}

fn map_is_empty(map: &&BTreeMap<String, serde_json::Value>) -> bool {
    map.is_empty()
}

fn slice_is_empty(slice: &&[String]) -> bool {
    slice.is_empty()
}

fn frames_are_empty(frames: &&[Frame]) -> bool {
    frames.is_empty()
}

impl Emitter for JsonEmitter {
    fn emit(&self, record: &LogRecord) -> Result<()> {
        let wire = JsonRecord {
            timestamp: record.timestamp.format(&self.time_format).to_string(),
            level: record.level.as_str(),
            msg: &record.message,
            values: &record.values,
            error: record.error.as_ref().map(|error| JsonError {
                msg: &error.message,
                kind: &error.kind,
                causes: &error.causes,
                stacktrace: &error.frames,
                values: &error.values,
            }),
        };

        let line = if self.pretty {
            serde_json::to_string_pretty(&wire)?
        } else {
            serde_json::to_string(&wire)?
        };

        let mut writer = self.writer.lock();
        writeln!(writer, "{line}").map_err(|e| LoggerError::io("writing JSON record", e))?;
        writer
            .flush()
            .map_err(|e| LoggerError::io("flushing JSON output", e))
    }

    fn name(&self) -> &str {
        "json"
    }
}
