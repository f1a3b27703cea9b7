//! Request/response trace stream.
//!
//! The gateway keeps two independent log streams: the operational `tracing`
//! stream and this one, a plain-text trace of every inbound request and its
//! outbound round trip. Lines are written as
//! `YYYY-MM-DD HH:MM:SS,mmm - LEVEL - MESSAGE`, one event per line, which is
//! the format the `logview` utility parses and groups.

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{Local, Timelike};

/// Severity of a trace event. Ordered so a sink can carry a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    Debug,
    Info,
    Error,
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraceLevel::Debug => "DEBUG",
            TraceLevel::Info => "INFO",
            TraceLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Level-filtered sink for request trace lines.
///
/// Independent of the `tracing` subscriber: the two streams are configured
/// separately and neither filters the other.
pub struct RequestTrace {
    min_level: TraceLevel,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl RequestTrace {
    pub fn stdout(min_level: TraceLevel) -> Self {
        Self::with_writer(min_level, Box::new(io::stdout()))
    }

    /// Sink writing somewhere other than stdout. Tests use this to capture
    /// the stream; a deployment could point it at a file.
    pub fn with_writer(min_level: TraceLevel, writer: Box<dyn Write + Send>) -> Self {
        Self {
            min_level,
            sink: Mutex::new(writer),
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(TraceLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(TraceLevel::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.log(TraceLevel::Error, message);
    }

    pub fn log(&self, level: TraceLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        let now = Local::now();
        let line = format!(
            "{},{:03} - {} - {}\n",
            now.format("%Y-%m-%d %H:%M:%S"),
            now.nanosecond() / 1_000_000,
            level,
            message
        );
        if let Ok(mut sink) = self.sink.lock() {
            // A broken sink must not take a request down with it.
            let _ = sink.write_all(line.as_bytes());
            let _ = sink.flush();
        }
    }
}
