//! Diagnostic notes recorded while a key is derived.
//!
//! A caller that wants to troubleshoot mismatching keys passes a sink to
//! [`crate::make_key`] and gets back the ordered list of steps taken to turn
//! the time input into a bucket string. Notes never influence the digest.

use std::fmt;

/// Severity attached to a trace note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLevel {
    Info,
}

impl TraceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceLevel::Info => "INFO",
        }
    }
}

/// One diagnostic note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceNote {
    pub level: TraceLevel,
    pub message: String,
}

impl TraceNote {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: TraceLevel::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for TraceNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level.as_str(), self.message)
    }
}

/// Appendable, ordered collector of trace notes.
pub trait TraceSink {
    fn record(&mut self, note: TraceNote);
}

impl TraceSink for Vec<TraceNote> {
    fn record(&mut self, note: TraceNote) {
        self.push(note);
    }
}

/// Forward a note to the `log` facade and, if present, to the caller's sink.
pub(crate) fn note(sink: &mut Option<&mut dyn TraceSink>, message: String) {
    log::debug!("{}", message);
    if let Some(sink) = sink.as_deref_mut() {
        sink.record(TraceNote::info(message));
    }
}
