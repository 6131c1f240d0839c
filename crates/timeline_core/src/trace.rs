//! Trace records and their stacked, render-ready form

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A named time interval, in milliseconds.
///
/// `to >= from` is expected but never enforced: malformed intervals flow
/// through stacking untouched and simply never become wide enough to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub from: f64,
    pub to: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Trace {
    pub fn new(name: impl Into<String>, from: f64, to: f64) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn duration(&self) -> f64 {
        self.to - self.from
    }

    /// Whether `other` lies fully inside this interval.
    pub fn contains(&self, other: &Trace) -> bool {
        self.from <= other.from && self.to >= other.to
    }
}

/// Index of a [`StackedTrace`] inside its [`StackedTraces`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(pub(crate) usize);

impl TraceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A trace annotated with its stack depth, enclosing parent and render priority.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedTrace {
    pub id: TraceId,
    pub trace: Trace,
    pub depth: usize,
    /// Nearest shallower trace that fully contains this one.
    pub parent: Option<TraceId>,
    /// Render priority in `[0, 1]`.
    pub importance: f64,
}

impl StackedTrace {
    pub fn name(&self) -> &str {
        &self.trace.name
    }

    pub fn from(&self) -> f64 {
        self.trace.from
    }

    pub fn to(&self) -> f64 {
        self.trace.to
    }

    pub fn domain(&self) -> Option<&str> {
        self.trace.domain.as_deref()
    }

    pub fn duration(&self) -> f64 {
        self.trace.duration()
    }

    /// Text drawn inside the trace element, e.g. `"parse 12ms"`.
    pub fn label(&self) -> String {
        format!("{} {}ms", self.trace.name, round_half_up(self.duration()))
    }

    /// Hover text with the exact duration and the importance score.
    pub fn tooltip(&self) -> String {
        format!("{} {}ms {}", self.trace.name, self.duration(), self.importance)
    }
}

/// Half-up rounding; normalises negative zero.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}

/// Arena of stacked traces in render-priority order (most important first).
///
/// Built once and never restacked; parents are plain indices into the arena.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackedTraces {
    pub(crate) traces: Vec<StackedTrace>,
    pub(crate) max_depth: usize,
}

impl StackedTraces {
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn get(&self, id: TraceId) -> Option<&StackedTrace> {
        self.traces.get(id.0)
    }

    /// Iterates in render-priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, StackedTrace> {
        self.traces.iter()
    }

    pub fn parent_of(&self, trace: &StackedTrace) -> Option<&StackedTrace> {
        trace.parent.and_then(|id| self.get(id))
    }

    /// Deepest depth in use, 0 for an empty arena.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn as_slice(&self) -> &[StackedTrace] {
        &self.traces
    }
}

impl Index<TraceId> for StackedTraces {
    type Output = StackedTrace;

    fn index(&self, id: TraceId) -> &StackedTrace {
        &self.traces[id.0]
    }
}

impl<'a> IntoIterator for &'a StackedTraces {
    type Item = &'a StackedTrace;
    type IntoIter = std::slice::Iter<'a, StackedTrace>;

    fn into_iter(self) -> Self::IntoIter {
        self.traces.iter()
    }
}
