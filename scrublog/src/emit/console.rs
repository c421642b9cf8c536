//! Human-readable console emitter.

use super::Emitter;
use crate::core::error::LoggerError;
use crate::core::{LogRecord, NormalizedError, Result};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

/// Writes records in a rich line-oriented format: timestamp, bracketed
/// colored level, message, one `"key" => value` line per attached value and
/// a framed block for errors.
///
/// Coloring is a per-instance setting, not process-global state.
pub struct ConsoleEmitter {
    use_colors: bool,
    time_format: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEmitter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            time_format: "%H:%M:%S%.3f".to_owned(),
            writer: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// Enable or disable ANSI colors for this emitter instance.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set a strftime-compatible timestamp format.
    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Redirect output, e.g. to stderr or a capture buffer in tests.
    #[must_use]
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }

    fn format_record(&self, record: &LogRecord) -> String {
        let level = if self.use_colors {
            record
                .level
                .as_str()
                .color(record.level.color_code())
                .bold()
                .to_string()
        } else {
            record.level.as_str().to_owned()
        };

        let mut out = format!(
            "{} [{}] {}\n",
            record.timestamp.format(&self.time_format),
            level,
            record.message
        );

        for (key, value) in &record.values {
            let rendered =
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            out.push_str(&format!("\"{key}\" => {rendered}\n"));
        }
        if !record.values.is_empty() {
            out.push('\n');
        }

        if let Some(error) = &record.error {
            out.push_str(&format_error_block(error));
        }

        out
    }
}

impl Default for ConsoleEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for ConsoleEmitter {
    fn emit(&self, record: &LogRecord) -> Result<()> {
        let output = self.format_record(record);
        let mut writer = self.writer.lock();
        writer
            .write_all(output.as_bytes())
            .map_err(|e| LoggerError::io("writing console output", e))?;
        writer
            .flush()
            .map_err(|e| LoggerError::io("flushing console output", e))
    }

    fn name(&self) -> &str {
        "console"
    }
}

fn format_error_block(error: &NormalizedError) -> String {
    let mut out = String::new();
    out.push_str("----------------[Error]----------------\n");
    out.push_str(&format!("{}: {}\n", error.kind, error.message));
    for cause in &error.causes {
        out.push_str(&format!("  caused by: {cause}\n"));
    }
    if !error.frames.is_empty() {
        out.push_str("\n[StackTrace]\n");
        for frame in &error.frames {
            out.push_str(&format!(
                "{}\n\t{}:{}\n",
                frame.function, frame.file, frame.line
            ));
        }
    }
    if !error.values.is_empty() {
        out.push_str("\n[Values]\n");
        for (key, value) in &error.values {
            out.push_str(&format!("{key} => {value}\n"));
        }
    }
    out.push_str("---------------------------------------\n");
    out
}
