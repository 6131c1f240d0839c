use std::collections::HashMap;
use std::ops::Range;
use std::time::{Duration, Instant};

use timeline_core::background::{Band, Line, Tile};
use timeline_core::{
    BackgroundSurface, Chart, ChartConfig, LevelOfDetail, Placement, StackedTrace, Trace, TraceId,
    TraceSurface,
};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Resize,
    Clear,
    Fill(Band),
    Stroke,
    Show(TraceId),
    Place(TraceId),
    Hide(TraceId),
    Interactive(bool),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
    shown: HashMap<TraceId, Placement>,
    interactive: Option<bool>,
}

impl Recorder {
    fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }
}

impl TraceSurface for Recorder {
    fn show(&mut self, trace: &StackedTrace, placement: Placement) {
        assert!(self.shown.insert(trace.id, placement).is_none(), "shown twice");
        self.ops.push(Op::Show(trace.id));
    }

    fn place(&mut self, trace: &StackedTrace, placement: Placement) {
        assert!(self.shown.insert(trace.id, placement).is_some(), "placed while hidden");
        self.ops.push(Op::Place(trace.id));
    }

    fn hide(&mut self, trace: &StackedTrace) {
        assert!(self.shown.remove(&trace.id).is_some(), "hidden while hidden");
        self.ops.push(Op::Hide(trace.id));
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = Some(interactive);
        self.ops.push(Op::Interactive(interactive));
    }
}

impl BackgroundSurface for Recorder {
    fn resize(&mut self, _width: f64, _height: f64) {
        self.ops.push(Op::Resize);
    }

    fn clear_background(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn fill_tiled(&mut self, band: Band, _rows: Range<f64>, _tile: &Tile, _phase_px: f64) {
        self.ops.push(Op::Fill(band));
    }

    fn stroke(&mut self, _line: Line) {
        self.ops.push(Op::Stroke);
    }
}

/// A root second, ten 80ms blocks, each with three calls of varying length.
fn nested_traces() -> Vec<Trace> {
    let mut traces = vec![Trace::new("ALL", 0.0, 1000.0)];
    for block in 0..10 {
        let start = block as f64 * 100.0;
        traces.push(Trace::new(format!("block{block}"), start, start + 80.0).with_domain("Runtime"));
        traces.push(Trace::new(format!("parse{block}"), start, start + 10.0));
        traces.push(Trace::new(format!("eval{block}"), start + 10.0, start + 50.0));
        traces.push(Trace::new(format!("emit{block}"), start + 50.0, start + 75.0));
    }
    traces
}

fn many_traces(count: usize) -> Vec<Trace> {
    (0..count)
        .map(|i| {
            let from = (i % 100) as f64 * 10.0;
            Trace::new(format!("t{i}"), from, from + 10.0 + (i % 7) as f64 * 50.0)
        })
        .collect()
}

fn find(chart: &Chart, name: &str) -> TraceId {
    chart.traces().iter().find(|t| t.name() == name).unwrap().id
}

fn open(traces: &[Trace]) -> (Chart, Recorder) {
    let mut chart = Chart::new(traces, &ChartConfig::default());
    let mut surface = Recorder::default();
    chart.on_resize(1000.0, 600.0, &mut surface);
    (chart, surface)
}

#[test]
fn test_resize_draws_background_before_traces() {
    let (chart, mut surface) = open(&nested_traces());
    let ops = surface.take();

    assert_eq!(
        ops[..5],
        [Op::Resize, Op::Clear, Op::Fill(Band::Ruler), Op::Fill(Band::Body), Op::Stroke]
    );
    assert!(ops[5..].iter().all(|op| matches!(op, Op::Show(_))));
    assert_eq!(ops.len() - 5, chart.traces().len());

    // Zoomed out to the full second.
    assert_eq!(chart.viewport().left(), 0.0);
    assert!((chart.viewport().pixel_per_ms() - 1.0).abs() < 1e-12);
}

#[test]
fn test_wheel_degrades_then_recovers() {
    let traces = many_traces(3000);
    let (mut chart, mut surface) = open(&traces);
    assert_eq!(chart.visible().len(), 512);
    surface.take();

    let start = Instant::now();
    let first = chart.on_wheel(500.0, 0.1, start, &mut surface).unwrap();
    assert_eq!(chart.level_of_detail(), LevelOfDetail::Low);
    assert_eq!(surface.interactive, Some(false));
    assert!(chart.visible().len() <= 64);
    assert_eq!(surface.shown.len(), chart.visible().len());

    // A second wheel event restarts the timer without toggling interactivity again.
    let second = chart
        .on_wheel(500.0, 0.1, start + Duration::from_millis(300), &mut surface)
        .unwrap();
    let toggles = surface.take().iter().filter(|op| matches!(op, Op::Interactive(_))).count();
    assert_eq!(toggles, 1);

    assert!(!chart.on_lod_timer(first, &mut surface));
    assert_eq!(chart.level_of_detail(), LevelOfDetail::Low);

    assert!(chart.on_lod_timer(second, &mut surface));
    assert_eq!(chart.level_of_detail(), LevelOfDetail::High);
    assert_eq!(surface.interactive, Some(true));
    assert!(chart.visible().len() > 64 && chart.visible().len() <= 512);
    assert!(chart.pending_timer().is_none());
}

#[test]
fn test_budget_holds_for_every_frame() {
    let traces = many_traces(5000);
    let (mut chart, mut surface) = open(&traces);
    let start = Instant::now();

    for step in 0..40 {
        let now = start + Duration::from_millis(step * 16);
        chart.on_wheel(100.0 + step as f64 * 20.0, 0.25, now, &mut surface);
        assert!(surface.shown.len() <= 64);
    }

    let handle = chart.pending_timer().unwrap();
    chart.on_lod_timer(handle, &mut surface);
    assert!(surface.shown.len() <= 512);
    assert_eq!(surface.shown.len(), chart.visible().len());
}

#[test]
fn test_drag_pans_and_suppresses_release_click() {
    let traces = nested_traces();
    let (mut chart, mut surface) = open(&traces);
    let start = Instant::now();

    // Zoom in so there is room to pan.
    let eval = find(&chart, "eval5");
    assert!(chart.on_click(eval, &mut surface));
    let left = chart.viewport().left();
    assert_eq!(left, 510.0);

    chart.on_drag_start(400.0);
    assert!(chart.on_drag_move(405.0, start, &mut surface).is_none());
    let handle = chart.on_drag_move(300.0, start, &mut surface).unwrap();
    assert!(chart.is_dragging());
    // 1000px over 40ms: 25 px/ms, dragged 100px to the left.
    assert!((chart.viewport().left() - (left + 4.0)).abs() < 1e-9);

    assert!(chart.on_drag_end());
    assert!(chart.on_lod_timer(handle, &mut surface));

    let root = find(&chart, "ALL");
    assert!(!chart.on_click(root, &mut surface));
    chart.clear_click_guard();
    assert!(chart.on_click(root, &mut surface));
    assert_eq!(chart.viewport().left(), 0.0);
}

#[test]
fn test_click_focuses_trace() {
    let traces = nested_traces();
    let (mut chart, mut surface) = open(&traces);
    let block = find(&chart, "block3");

    chart.on_drag_start(320.0);
    assert!(!chart.on_drag_end());
    assert!(chart.on_click(block, &mut surface));

    let viewport = chart.viewport();
    assert!((80.0 * viewport.pixel_per_ms() - 1000.0).abs() < 1e-9);
    assert_eq!(viewport.left(), 300.0);

    let placement = surface.shown[&block];
    assert_eq!(placement.left_px, 0.0);
    assert!(placement.right_px.abs() < 1e-9);
    assert_eq!(placement.top_px, 51.0);
}

#[test]
fn test_clicks_ignored_at_low_detail() {
    let traces = nested_traces();
    let (mut chart, mut surface) = open(&traces);
    chart.on_wheel(500.0, 0.25, Instant::now(), &mut surface);

    let before = chart.viewport().clone();
    assert!(!chart.on_click(find(&chart, "block1"), &mut surface));
    assert_eq!(chart.viewport(), &before);
}

#[test]
fn test_empty_chart_is_inert() {
    let (mut chart, mut surface) = open(&[]);
    assert!(chart.traces().is_empty());
    assert!(chart.viewport().is_empty());
    assert!(chart.viewport().pixel_per_ms().is_finite());
    assert!(chart.visible().is_empty());

    let now = Instant::now();
    assert!(chart.on_wheel(10.0, 0.25, now, &mut surface).is_none());
    chart.on_drag_start(10.0);
    assert!(chart.on_drag_move(200.0, now, &mut surface).is_none());
    assert_eq!(chart.level_of_detail(), LevelOfDetail::High);
    assert!(surface.shown.is_empty());
}

#[test]
fn test_single_instant_uses_fixed_scale() {
    let traces = vec![Trace::new("a", 42.0, 42.0), Trace::new("b", 42.0, 42.0)];
    let (mut chart, mut surface) = open(&traces);
    assert_eq!(chart.viewport().pixel_per_ms(), 1.0);
    assert_eq!(chart.viewport().left(), 42.0);

    chart.on_wheel(0.0, 0.25, Instant::now(), &mut surface);
    assert_eq!(chart.viewport().pixel_per_ms(), 1.0);
    // Zero-width traces are never drawn.
    assert!(surface.shown.is_empty());
}
