//! Streaming trace collection from log output

use std::borrow::Cow;
use std::io::{BufRead, Write};
use anyhow::{Context, Result};
use timeline_core::Trace;
use crate::parser::parse_trace_line;

/// Whole milliseconds, without a negative zero.
fn whole_ms(value: f64) -> f64 {
    value.floor() + 0.0
}

/// Gathers traces from log lines as they arrive.
///
/// Each consumed line is echoed back: non-timeline lines unchanged, timeline
/// lines as a short summary with times relative to the first trace seen.
#[derive(Debug, Default)]
pub struct TraceCollector {
    traces: Vec<Trace>,
    origin: Option<f64>,
}

impl TraceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line and return the text to echo for it.
    pub fn consume<'a>(&mut self, line: &'a str) -> Cow<'a, str> {
        let Some(trace) = parse_trace_line(line) else {
            return Cow::Borrowed(line);
        };
        let origin = *self.origin.get_or_insert(trace.from);
        let summary = format!(
            "Timeline: {}  ({} - {}) [{}]",
            trace.name,
            whole_ms(trace.from - origin),
            whole_ms(trace.to - origin),
            whole_ms(trace.duration())
        );
        self.traces.push(trace);
        Cow::Owned(summary)
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn into_traces(self) -> Vec<Trace> {
        self.traces
    }
}

/// Read `reader` to the end, echoing every line to `echo`, and return the
/// traces found.
pub fn collect_from_reader(reader: impl BufRead, mut echo: impl Write) -> Result<Vec<Trace>> {
    let mut collector = TraceCollector::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read log line {}", index + 1))?;
        writeln!(echo, "{}", collector.consume(&line)).context("Failed to echo log line")?;
    }
    echo.flush().context("Failed to flush log output")?;
    tracing::info!("Collected {} timeline traces", collector.len());
    Ok(collector.into_traces())
}
