//! What the chart needs from a drawing host
//!
//! The chart never touches a window directly. Hosts implement these traits
//! (the gpui view does, and so do the recording surfaces in tests).

use std::ops::Range;
use crate::background::{Band, Line, Tile};
use crate::trace::StackedTrace;

/// Horizontal and vertical position of one trace element, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Distance of the left edge from the surface's left edge.
    pub left_px: f64,
    /// Distance of the right edge from the surface's right edge.
    pub right_px: f64,
    pub top_px: f64,
}

impl Placement {
    /// Element width on a surface `surface_width` pixels wide.
    pub fn width(&self, surface_width: f64) -> f64 {
        surface_width - self.left_px - self.right_px
    }
}

/// Per-trace labelled elements.
pub trait TraceSurface {
    /// Make the element for `trace` visible at `placement`.
    fn show(&mut self, trace: &StackedTrace, placement: Placement);
    /// Move an already visible element.
    fn place(&mut self, trace: &StackedTrace, placement: Placement);
    fn hide(&mut self, trace: &StackedTrace);
    /// Enable or disable pointer events on trace elements.
    fn set_interactive(&mut self, interactive: bool);
}

/// The tiled ruler and grid behind the traces.
pub trait BackgroundSurface {
    fn resize(&mut self, width: f64, height: f64);
    fn clear_background(&mut self);
    /// Repeat `tile` across the full width between `rows`, shifted
    /// horizontally by `phase_px`.
    fn fill_tiled(&mut self, band: Band, rows: Range<f64>, tile: &Tile, phase_px: f64);
    fn stroke(&mut self, line: Line);
}

pub trait ChartSurface: TraceSurface + BackgroundSurface {}

impl<T: TraceSurface + BackgroundSurface> ChartSurface for T {}
