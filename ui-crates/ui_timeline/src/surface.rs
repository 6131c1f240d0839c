//! Display list the chart draws into
//!
//! The chart pushes show/place/hide and background commands here; the view
//! renders whatever the list holds on the next frame.

use std::collections::BTreeMap;
use std::ops::Range;
use gpui::SharedString;
use timeline_core::background::{Band, Line, Tile};
use timeline_core::{BackgroundSurface, Placement, StackedTrace, TraceId, TraceSurface};

/// One visible trace bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceElement {
    pub id: TraceId,
    pub label: SharedString,
    pub tooltip: SharedString,
    pub domain: Option<SharedString>,
    pub placement: Placement,
}

/// A tiled band of the background.
#[derive(Debug, Clone, PartialEq)]
pub struct TiledBand {
    pub band: Band,
    pub rows: Range<f64>,
    pub tile: Tile,
    pub phase_px: f64,
}

#[derive(Debug)]
pub struct GpuiSurface {
    width: f64,
    height: f64,
    interactive: bool,
    elements: BTreeMap<TraceId, TraceElement>,
    bands: Vec<TiledBand>,
    strokes: Vec<Line>,
}

impl Default for GpuiSurface {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            interactive: true,
            elements: BTreeMap::new(),
            bands: Vec::new(),
            strokes: Vec::new(),
        }
    }
}

impl GpuiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Whether trace bars should take pointer events.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Visible bars, most important first.
    pub fn elements(&self) -> impl Iterator<Item = &TraceElement> {
        self.elements.values()
    }

    pub fn element(&self, id: TraceId) -> Option<&TraceElement> {
        self.elements.get(&id)
    }

    pub fn bands(&self) -> &[TiledBand] {
        &self.bands
    }

    pub fn strokes(&self) -> &[Line] {
        &self.strokes
    }
}

impl TraceSurface for GpuiSurface {
    fn show(&mut self, trace: &StackedTrace, placement: Placement) {
        self.elements.insert(
            trace.id,
            TraceElement {
                id: trace.id,
                label: trace.label().into(),
                tooltip: trace.tooltip().into(),
                domain: trace.domain().map(|d| SharedString::from(d.to_string())),
                placement,
            },
        );
    }

    fn place(&mut self, trace: &StackedTrace, placement: Placement) {
        match self.elements.get_mut(&trace.id) {
            Some(element) => element.placement = placement,
            None => self.show(trace, placement),
        }
    }

    fn hide(&mut self, trace: &StackedTrace) {
        self.elements.remove(&trace.id);
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }
}

impl BackgroundSurface for GpuiSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear_background(&mut self) {
        self.bands.clear();
        self.strokes.clear();
    }

    fn fill_tiled(&mut self, band: Band, rows: Range<f64>, tile: &Tile, phase_px: f64) {
        self.bands.push(TiledBand {
            band,
            rows,
            tile: tile.clone(),
            phase_px,
        });
    }

    fn stroke(&mut self, line: Line) {
        self.strokes.push(line);
    }
}
