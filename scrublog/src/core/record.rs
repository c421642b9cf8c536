//! The finalized unit handed to the emission pipeline.

use super::level::LogLevel;
use super::report::NormalizedError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One finalized log statement.
///
/// Built fresh per log call from the logger's context snapshot, emitted
/// once, then discarded. Values are already redacted copies; emitters must
/// not retain the record beyond the `emit` call.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub values: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<NormalizedError>,
}
