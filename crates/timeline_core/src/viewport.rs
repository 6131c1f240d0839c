//! Visible time window: pan, zoom, focus and clamping
//!
//! The window is described by its left edge in milliseconds and a scale in
//! pixels per millisecond. Every mutation is followed by [`Viewport::clamp`],
//! which keeps the window inside the data extent.

use std::ops::Range;
use crate::config::ChartConfig;
use crate::trace::Trace;

/// Time extent of a built trace set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBounds {
    pub min: f64,
    pub max: f64,
}

impl TimeBounds {
    /// Smallest `from` and largest `to` over the finite endpoints.
    ///
    /// Returns `None` when there is nothing finite to span; the viewport
    /// treats that as its empty state instead of working with infinities.
    pub fn from_traces<'a>(traces: impl IntoIterator<Item = &'a Trace>) -> Option<Self> {
        let (min, max) = traces.into_iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), trace| {
                let min = if trace.from.is_finite() { min.min(trace.from) } else { min };
                let max = if trace.to.is_finite() { max.max(trace.to) } else { max };
                (min, max)
            },
        );
        (min.is_finite() && max.is_finite()).then_some(Self { min, max })
    }

    pub fn extent(&self) -> f64 {
        self.max - self.min
    }
}

/// Pan/zoom state of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    left: f64,
    pixel_per_ms: f64,
    width: f64,
    height: f64,
    bounds: Option<TimeBounds>,
    zoom_step_limit: f64,
    degenerate_pixel_per_ms: f64,
}

impl Viewport {
    /// A zero-sized viewport over `bounds`, starting at the left edge of the data.
    pub fn new(bounds: Option<TimeBounds>, config: &ChartConfig) -> Self {
        let mut viewport = Self {
            left: bounds.map_or(0.0, |b| b.min),
            pixel_per_ms: config.initial_pixel_per_ms,
            width: 0.0,
            height: 0.0,
            bounds,
            zoom_step_limit: config.zoom_step_limit,
            degenerate_pixel_per_ms: config.degenerate_pixel_per_ms,
        };
        viewport.clamp();
        viewport
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn pixel_per_ms(&self) -> f64 {
        self.pixel_per_ms
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bounds(&self) -> Option<TimeBounds> {
        self.bounds
    }

    /// No finite data to show; pan, zoom and focus are no-ops.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Time under the right edge of the surface.
    pub fn right(&self) -> f64 {
        self.left + self.width / self.pixel_per_ms
    }

    pub fn visible_range(&self) -> Option<Range<f64>> {
        self.bounds.map(|_| self.left..self.right())
    }

    pub fn time_to_x(&self, time_ms: f64) -> f64 {
        (time_ms - self.left) * self.pixel_per_ms
    }

    pub fn x_to_time(&self, x: f64) -> f64 {
        self.left + x / self.pixel_per_ms
    }

    /// Update the surface size; callers clamp afterwards.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    }

    /// Zoom by `delta` binary orders of magnitude around `focal_x`, keeping the
    /// time under `focal_x` fixed. `delta` is limited to the configured step.
    pub fn zoom(&mut self, focal_x: f64, delta: f64) {
        if self.is_empty() || !focal_x.is_finite() {
            return;
        }
        let delta = if delta.is_nan() {
            0.0
        } else {
            delta.clamp(-self.zoom_step_limit, self.zoom_step_limit)
        };
        let focal_time = self.x_to_time(focal_x);
        self.pixel_per_ms = (self.pixel_per_ms.log2() + delta).exp2();
        self.left = focal_time - focal_x / self.pixel_per_ms;
    }

    /// Shift the window so content moves right by `delta_x` pixels.
    pub fn pan(&mut self, delta_x: f64) {
        if self.is_empty() || !delta_x.is_finite() {
            return;
        }
        self.left -= delta_x / self.pixel_per_ms;
    }

    /// Zoom so `trace` exactly fills the surface.
    ///
    /// Returns `false` (and leaves the window alone) for traces without a
    /// positive finite duration or when the surface has no width.
    pub fn focus(&mut self, trace: &Trace) -> bool {
        let duration = trace.duration();
        if self.is_empty() || !(duration > 0.0 && duration.is_finite()) || self.width <= 0.0 {
            return false;
        }
        self.pixel_per_ms = self.width / duration;
        self.left = trace.from;
        true
    }

    /// Keep the window within the data extent.
    ///
    /// The scale may not zoom out past the full extent, and `left` is kept in
    /// `[min, max - width / pixel_per_ms]`. A dataset spanning a single instant
    /// falls back to a fixed scale, and the empty state pins the window at 0.
    pub fn clamp(&mut self) {
        let Some(bounds) = self.bounds else {
            self.left = 0.0;
            self.pixel_per_ms = self.degenerate_pixel_per_ms;
            return;
        };

        let extent = bounds.extent();
        if !(extent > 0.0) {
            self.left = bounds.min;
            self.pixel_per_ms = self.degenerate_pixel_per_ms;
            return;
        }

        let fit = self.width / extent;
        let scale = self.pixel_per_ms.max(fit);
        self.pixel_per_ms = if scale.is_finite() && scale > 0.0 {
            scale
        } else if fit > 0.0 {
            fit
        } else {
            self.degenerate_pixel_per_ms
        };

        let span = self.width / self.pixel_per_ms;
        let left = if self.left.is_finite() { self.left } else { bounds.min };
        self.left = left.max(bounds.min).min(bounds.max - span);
    }
}
