//! Trace sinks: where the machine reports each configuration it visits.
//!
//! The machine hands every `(statement, environment)` pair to a
//! [`TraceSink`] before each step, and once more after the last one.
//! Sinks provided here:
//! - [`Trace`]: buffers entries in memory (tests, JSON export)
//! - [`StdoutSink`]: prints one `statement, environment` line per entry
//! - [`LogSink`]: emits each entry as a `tracing` event
//!
//! Any `FnMut(&TraceEntry)` closure is a sink too.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded configuration, rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Steps taken before this configuration was reached.
    pub step: u64,
    pub statement: String,
    pub environment: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.statement, self.environment)
    }
}

/// Receives configurations in the order the machine visits them. Append-only.
pub trait TraceSink {
    fn record(&mut self, entry: &TraceEntry);
}

impl<F: FnMut(&TraceEntry)> TraceSink for F {
    fn record(&mut self, entry: &TraceEntry) {
        self(entry)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Buffered trace
// ══════════════════════════════════════════════════════════════════════════════

/// An in-memory trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The terminal configuration, once a run has finished.
    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// Rendered statements only, in order.
    pub fn statements(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.statement.as_str()).collect()
    }

    /// Pretty-printed JSON: `{"entries": [{"step": 0, "statement": ..., "environment": ...}]}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl TraceSink for Trace {
    fn record(&mut self, entry: &TraceEntry) {
        self.entries.push(entry.clone());
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Streaming sinks
// ══════════════════════════════════════════════════════════════════════════════

/// Prints each entry to stdout as it arrives.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl TraceSink for StdoutSink {
    fn record(&mut self, entry: &TraceEntry) {
        println!("{entry}");
    }
}

/// Forwards each entry to `tracing` at INFO level.
#[derive(Debug, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, entry: &TraceEntry) {
        tracing::info!(
            step = entry.step,
            statement = %entry.statement,
            environment = %entry.environment,
            "configuration"
        );
    }
}
