//! Per-tick selection of the traces worth drawing
//!
//! Traces are considered in render-priority order and the walk stops at the
//! active budget, so the work per frame is bounded no matter how many traces
//! were loaded. The result is diffed against the previous frame so the host
//! only toggles elements that actually enter or leave the view.

use std::collections::HashSet;
use crate::config::ChartConfig;
use crate::render::{Placement, TraceSurface};
use crate::trace::{StackedTrace, StackedTraces, TraceId};
use crate::viewport::Viewport;

/// Horizontal pixel span of `trace` under `viewport`.
fn pixel_span(trace: &StackedTrace, viewport: &Viewport) -> (f64, f64) {
    (viewport.time_to_x(trace.from()), viewport.time_to_x(trace.to()))
}

/// The traces to draw this tick, most important first.
///
/// A trace qualifies when it overlaps the surface horizontally and is at
/// least `min_width_px` wide. At most `budget` traces are returned.
pub fn select_visible(
    traces: &StackedTraces,
    viewport: &Viewport,
    budget: usize,
    min_width_px: f64,
) -> Vec<TraceId> {
    if viewport.is_empty() || budget == 0 {
        return Vec::new();
    }
    let width = viewport.width();
    traces
        .iter()
        .filter(|trace| {
            let (left_px, right_px) = pixel_span(trace, viewport);
            right_px >= 0.0 && left_px <= width && right_px - left_px >= min_width_px
        })
        .map(|trace| trace.id)
        .take(budget)
        .collect()
}

/// What changed between two frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameDiff {
    pub hidden: Vec<TraceId>,
    pub shown: Vec<TraceId>,
    pub moved: Vec<TraceId>,
}

#[derive(Debug)]
pub struct VisibilitySelector {
    visible: Vec<TraceId>,
    visible_set: HashSet<TraceId>,
    config: ChartConfig,
}

impl VisibilitySelector {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            visible: Vec::new(),
            visible_set: HashSet::new(),
            config: config.clone(),
        }
    }

    /// Traces shown in the last frame, most important first.
    pub fn visible(&self) -> &[TraceId] {
        &self.visible
    }

    pub fn is_visible(&self, id: TraceId) -> bool {
        self.visible_set.contains(&id)
    }

    /// Element position for `trace`. Edges are allowed to hang at most the
    /// overscan past either side of the surface.
    pub fn placement(&self, trace: &StackedTrace, viewport: &Viewport) -> Placement {
        let (left_px, right_px) = pixel_span(trace, viewport);
        Placement {
            left_px: left_px.max(-self.config.overscan_px),
            right_px: (viewport.width() - right_px).max(-self.config.overscan_px),
            top_px: self.config.row_top(trace.depth),
        }
    }

    /// Select this frame's traces and push the changes to `surface`.
    pub fn update(
        &mut self,
        traces: &StackedTraces,
        viewport: &Viewport,
        budget: usize,
        surface: &mut impl TraceSurface,
    ) -> FrameDiff {
        let next = select_visible(traces, viewport, budget, self.config.min_trace_width_px);
        let next_set: HashSet<TraceId> = next.iter().copied().collect();
        let mut diff = FrameDiff::default();

        for &id in &self.visible {
            if !next_set.contains(&id) {
                surface.hide(&traces[id]);
                diff.hidden.push(id);
            }
        }

        for &id in &next {
            let trace = &traces[id];
            let placement = self.placement(trace, viewport);
            if self.visible_set.contains(&id) {
                surface.place(trace, placement);
                diff.moved.push(id);
            } else {
                surface.show(trace, placement);
                diff.shown.push(id);
            }
        }

        tracing::trace!(
            "Visible traces: {} (+{} -{}), budget {}",
            next.len(),
            diff.shown.len(),
            diff.hidden.len(),
            budget
        );

        self.visible = next;
        self.visible_set = next_set;
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack;
    use crate::trace::Trace;
    use crate::viewport::TimeBounds;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Elements {
        shown: HashMap<String, Placement>,
        toggles: usize,
    }

    impl TraceSurface for Elements {
        fn show(&mut self, trace: &StackedTrace, placement: Placement) {
            self.toggles += 1;
            assert!(self.shown.insert(trace.name().to_string(), placement).is_none());
        }

        fn place(&mut self, trace: &StackedTrace, placement: Placement) {
            *self.shown.get_mut(trace.name()).unwrap() = placement;
        }

        fn hide(&mut self, trace: &StackedTrace) {
            self.toggles += 1;
            assert!(self.shown.remove(trace.name()).is_some());
        }

        fn set_interactive(&mut self, _interactive: bool) {}
    }

    fn setup(traces: &[Trace], width: f64) -> (StackedTraces, Viewport) {
        let config = ChartConfig::default();
        let stacked = stack::build(traces);
        let mut viewport = Viewport::new(TimeBounds::from_traces(traces), &config);
        viewport.resize(width, 400.0);
        viewport.clamp();
        (stacked, viewport)
    }

    fn names(stacked: &StackedTraces, ids: &[TraceId]) -> Vec<String> {
        ids.iter().map(|&id| stacked[id].name().to_string()).collect()
    }

    #[test]
    fn test_budget_caps_selection() {
        let traces: Vec<Trace> = (0..1000)
            .map(|i| Trace::new(format!("t{i}"), i as f64 * 10.0, i as f64 * 10.0 + 10.0))
            .collect();
        let (stacked, viewport) = setup(&traces, 100_000.0);

        assert_eq!(select_visible(&stacked, &viewport, 512, 2.0).len(), 512);
        assert_eq!(select_visible(&stacked, &viewport, 64, 2.0).len(), 64);
        assert!(select_visible(&stacked, &viewport, 0, 2.0).is_empty());
    }

    #[test]
    fn test_thin_and_backwards_traces_are_skipped() {
        // 1000ms over 1000px: one pixel per millisecond.
        let traces = vec![
            Trace::new("root", 0.0, 1000.0),
            Trace::new("thin", 100.0, 101.5),
            Trace::new("wide-enough", 200.0, 202.0),
            Trace::new("backwards", 500.0, 400.0),
        ];
        let (stacked, viewport) = setup(&traces, 1000.0);

        let visible = names(&stacked, &select_visible(&stacked, &viewport, 512, 2.0));
        assert!(visible.contains(&"root".to_string()));
        assert!(visible.contains(&"wide-enough".to_string()));
        assert!(!visible.contains(&"thin".to_string()));
        assert!(!visible.contains(&"backwards".to_string()));
    }

    #[test]
    fn test_offscreen_traces_are_skipped() {
        let traces = vec![
            Trace::new("root", 0.0, 1000.0),
            Trace::new("early", 0.0, 100.0),
            Trace::new("late", 800.0, 1000.0),
        ];
        let (stacked, mut viewport) = setup(&traces, 100.0);
        viewport.focus(&traces[2]);
        viewport.clamp();

        let visible = names(&stacked, &select_visible(&stacked, &viewport, 512, 2.0));
        assert_eq!(visible, vec!["root", "late"]);
    }

    #[test]
    fn test_placement_overscan_and_rows() {
        let traces = vec![Trace::new("root", 0.0, 1000.0), Trace::new("child", 100.0, 300.0)];
        let (stacked, mut viewport) = setup(&traces, 1000.0);
        let selector = VisibilitySelector::new(&ChartConfig::default());

        let child = stacked.iter().find(|t| t.name() == "child").unwrap();
        let placement = selector.placement(child, &viewport);
        assert_eq!(placement, Placement { left_px: 100.0, right_px: 700.0, top_px: 51.0 });
        assert_eq!(placement.width(viewport.width()), 200.0);

        viewport.focus(&traces[1]);
        let root = stacked.iter().find(|t| t.name() == "root").unwrap();
        let placement = selector.placement(root, &viewport);
        assert_eq!(placement.left_px, -5.0);
        assert_eq!(placement.right_px, -5.0);
        assert_eq!(placement.top_px, 30.0);
    }

    #[test]
    fn test_update_diffs_frames() {
        let traces = vec![
            Trace::new("root", 0.0, 1000.0),
            Trace::new("left", 0.0, 400.0),
            Trace::new("right", 600.0, 1000.0),
        ];
        let (stacked, mut viewport) = setup(&traces, 1000.0);
        let mut selector = VisibilitySelector::new(&ChartConfig::default());
        let mut surface = Elements::default();

        let first = selector.update(&stacked, &viewport, 512, &mut surface);
        assert_eq!(first.shown.len(), 3);
        assert!(first.hidden.is_empty() && first.moved.is_empty());

        // Zoom onto "left": "right" leaves, the others only move.
        viewport.focus(&traces[1]);
        viewport.clamp();
        let second = selector.update(&stacked, &viewport, 512, &mut surface);
        assert_eq!(names(&stacked, &second.hidden), vec!["right"]);
        assert!(second.shown.is_empty());
        assert_eq!(second.moved.len(), 2);
        assert_eq!(surface.toggles, 4);
        assert_eq!(surface.shown["left"].left_px, 0.0);

        // An unchanged frame toggles nothing.
        let third = selector.update(&stacked, &viewport, 512, &mut surface);
        assert!(third.hidden.is_empty() && third.shown.is_empty());
        assert_eq!(surface.toggles, 4);
        assert!(selector.is_visible(third.moved[0]));
    }

    #[test]
    fn test_lower_budget_hides_least_important() {
        let traces = vec![
            Trace::new("root", 0.0, 1000.0),
            Trace::new("a", 0.0, 500.0),
            Trace::new("aa", 0.0, 100.0),
            Trace::new("ab", 100.0, 350.0),
        ];
        let (stacked, viewport) = setup(&traces, 1000.0);
        let mut selector = VisibilitySelector::new(&ChartConfig::default());
        let mut surface = Elements::default();

        selector.update(&stacked, &viewport, 4, &mut surface);
        let diff = selector.update(&stacked, &viewport, 3, &mut surface);
        // "ab" covers half of its parent, so "aa" is the least important.
        assert_eq!(names(&stacked, &diff.hidden), vec!["aa"]);
        assert_eq!(selector.visible().len(), 3);
    }

    #[test]
    fn test_empty_viewport_shows_nothing() {
        let (stacked, viewport) = setup(&[], 800.0);
        let mut selector = VisibilitySelector::new(&ChartConfig::default());
        let mut surface = Elements::default();
        let diff = selector.update(&stacked, &viewport, 512, &mut surface);
        assert_eq!(diff, FrameDiff::default());
    }
}
