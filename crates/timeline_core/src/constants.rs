//! Layout, budget and timing constants for the timeline chart

/// Height of the ruler strip at the top of the chart.
pub const RULER_HEIGHT: f64 = 30.0;
/// Vertical distance between two stack depths.
pub const ROW_HEIGHT: f64 = 21.0;
/// Trace elements may hang this far past either edge of the surface.
pub const OVERSCAN: f64 = 5.0;
/// Narrower traces are not worth a label.
pub const MIN_TRACE_WIDTH: f64 = 2.0;

pub const HIGH_DETAIL_BUDGET: usize = 512;
pub const LOW_DETAIL_BUDGET: usize = 64;
pub const LOD_RECOVERY_MS: u64 = 1000;

pub const DRAG_THRESHOLD: f64 = 8.0;
pub const ZOOM_STEP_LIMIT: f64 = 0.25;

/// Deliberately tiny so the first clamp zooms out to the full extent.
pub const INITIAL_PIXEL_PER_MS: f64 = 0.0000001;
/// Scale used when every trace collapses onto a single instant.
pub const DEGENERATE_PIXEL_PER_MS: f64 = 1.0;

/// One background tile spans a second, with a tick every 100ms.
pub const MS_PER_TILE: f64 = 1000.0;
pub const MS_PER_TICK: f64 = 100.0;
