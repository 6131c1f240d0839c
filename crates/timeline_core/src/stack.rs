//! Stack-depth assignment, parent discovery and importance scoring
//!
//! Traces are placed greedily, earliest start first, into the lowest depth
//! whose previous occupant has already ended. Each placed trace then looks up
//! the nearest shallower occupant that fully encloses it. The result is
//! reordered by importance so the renderer can stop after its budget.

use std::cmp::Ordering;
use std::f64::consts::PI;
use crate::trace::{StackedTrace, StackedTraces, Trace, TraceId};

/// Placement-order record, before the importance sort.
struct Placed<'a> {
    trace: &'a Trace,
    depth: usize,
    parent: Option<usize>,
    importance: f64,
}

/// Order used for placement: `from` ascending, ties by `to` descending so the
/// longer of two traces starting together is placed first and can enclose the other.
fn placement_order(a: &Trace, b: &Trace) -> Ordering {
    a.from.total_cmp(&b.from).then_with(|| b.to.total_cmp(&a.to))
}

/// Build the stacked, render-priority-ordered arena for a trace set.
///
/// Total and deterministic: any input, including empty or malformed
/// intervals, produces an arena.
pub fn build(traces: &[Trace]) -> StackedTraces {
    let mut sorted: Vec<&Trace> = traces.iter().collect();
    sorted.sort_by(|a, b| placement_order(a, b));

    // Occupant (placement index) of every depth opened so far.
    let mut occupants: Vec<usize> = Vec::new();
    let mut placed: Vec<Placed> = Vec::with_capacity(sorted.len());

    for (index, trace) in sorted.into_iter().enumerate() {
        let depth = occupants
            .iter()
            .position(|&occupant| placed[occupant].trace.to <= trace.from)
            .unwrap_or(occupants.len());
        if depth == occupants.len() {
            occupants.push(index);
        } else {
            occupants[depth] = index;
        }

        let parent = occupants[..depth]
            .iter()
            .rev()
            .copied()
            .find(|&candidate| placed[candidate].trace.contains(trace));

        let importance = importance(depth, trace, parent.map(|p| placed[p].trace));
        placed.push(Placed {
            trace,
            depth,
            parent,
            importance,
        });
    }

    // Stable: equally important traces keep placement order.
    let mut priority: Vec<usize> = (0..placed.len()).collect();
    priority.sort_by(|&a, &b| placed[b].importance.total_cmp(&placed[a].importance));

    let mut arena_index = vec![0; placed.len()];
    for (position, &placement) in priority.iter().enumerate() {
        arena_index[placement] = position;
    }

    let stacked: Vec<StackedTrace> = priority
        .iter()
        .enumerate()
        .map(|(position, &placement)| {
            let record = &placed[placement];
            StackedTrace {
                id: TraceId(position),
                trace: record.trace.clone(),
                depth: record.depth,
                parent: record.parent.map(|p| TraceId(arena_index[p])),
                importance: record.importance,
            }
        })
        .collect();

    let max_depth = stacked.iter().map(|t| t.depth).max().unwrap_or(0);
    tracing::debug!(
        "Stacked {} traces into {} levels",
        stacked.len(),
        if stacked.is_empty() { 0 } else { max_depth + 1 }
    );

    StackedTraces {
        traces: stacked,
        max_depth,
    }
}

/// Render priority of a placed trace.
///
/// Top-level traces and the first nesting level always score 1. Deeper
/// children score `0.5 - cos(2π·ratio)·0.5` where `ratio` is their share of the
/// parent's duration: a child covering about half its parent scores highest,
/// slivers and near-copies of the parent score lowest.
pub fn importance(depth: usize, trace: &Trace, parent: Option<&Trace>) -> f64 {
    let Some(parent) = parent else {
        return 1.0;
    };
    if depth <= 1 {
        return 1.0;
    }
    let ratio = trace.duration() / parent.duration();
    if !ratio.is_finite() {
        // Zero-length or non-finite parent.
        return 0.0;
    }
    0.5 - (2.0 * PI * ratio).cos() * 0.5
}
