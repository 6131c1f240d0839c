//! The interactive chart: host events in, surface updates out
//!
//! Every handler applies its viewport mutation, clamps, then redraws the
//! background and the visible set against that one clamped viewport. The
//! surface is passed into each call; the chart keeps no reference to its host.

use std::time::Instant;
use crate::background::BackgroundRenderer;
use crate::config::ChartConfig;
use crate::input::InputRouter;
use crate::lod::{LevelOfDetail, LodManager, TimerHandle};
use crate::render::ChartSurface;
use crate::stack;
use crate::trace::{StackedTraces, Trace, TraceId};
use crate::viewport::{TimeBounds, Viewport};
use crate::visibility::VisibilitySelector;

#[derive(Debug)]
pub struct Chart {
    traces: StackedTraces,
    viewport: Viewport,
    lod: LodManager,
    visibility: VisibilitySelector,
    background: BackgroundRenderer,
    input: InputRouter,
}

impl Chart {
    /// Stack `traces` and start zoomed out to their full extent.
    pub fn new(traces: &[Trace], config: &ChartConfig) -> Self {
        let bounds = TimeBounds::from_traces(traces);
        if bounds.is_none() {
            tracing::warn!("No traces with finite bounds; chart starts empty");
        }
        Self {
            traces: stack::build(traces),
            viewport: Viewport::new(bounds, config),
            lod: LodManager::new(config),
            visibility: VisibilitySelector::new(config),
            background: BackgroundRenderer::new(config),
            input: InputRouter::new(config),
        }
    }

    pub fn traces(&self) -> &StackedTraces {
        &self.traces
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn level_of_detail(&self) -> LevelOfDetail {
        self.lod.level()
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.lod.pending()
    }

    /// Traces currently shown, most important first.
    pub fn visible(&self) -> &[TraceId] {
        self.visibility.visible()
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    pub fn on_resize(&mut self, width: f64, height: f64, surface: &mut impl ChartSurface) {
        self.viewport.resize(width, height);
        self.background
            .resize(self.viewport.width(), self.viewport.height(), surface);
        self.viewport.clamp();
        self.redraw(surface);
    }

    /// Zoom around `cursor_x`. Returns the recovery timer the host must
    /// schedule, or `None` when there is nothing to zoom.
    pub fn on_wheel(
        &mut self,
        cursor_x: f64,
        delta: f64,
        now: Instant,
        surface: &mut impl ChartSurface,
    ) -> Option<TimerHandle> {
        if self.viewport.is_empty() {
            return None;
        }
        self.viewport.zoom(cursor_x, delta);
        let handle = self.degrade(now, surface);
        self.viewport.clamp();
        self.redraw(surface);
        Some(handle)
    }

    pub fn on_drag_start(&mut self, x: f64) {
        self.input.pointer_down(x, &self.viewport);
    }

    /// Pan once the press has become a drag. Returns the recovery timer the
    /// host must schedule, if the view moved.
    pub fn on_drag_move(
        &mut self,
        x: f64,
        now: Instant,
        surface: &mut impl ChartSurface,
    ) -> Option<TimerHandle> {
        let delta = self.input.pointer_move(x, &self.viewport)?;
        if self.viewport.is_empty() {
            return None;
        }
        self.viewport.pan(delta);
        let handle = self.degrade(now, surface);
        self.viewport.clamp();
        self.redraw(surface);
        Some(handle)
    }

    /// Returns `true` if a drag ended and the host should clear the click
    /// guard on its next tick.
    pub fn on_drag_end(&mut self) -> bool {
        self.input.pointer_up()
    }

    /// Zoom onto the clicked trace. Returns `false` if the click was
    /// swallowed (drag release, low detail) or the trace cannot be focused.
    pub fn on_click(&mut self, id: TraceId, surface: &mut impl ChartSurface) -> bool {
        if !self.input.accept_click() || !self.lod.is_interactive() {
            tracing::trace!("Click on trace #{} suppressed", id.index());
            return false;
        }
        let Some(trace) = self.traces.get(id) else {
            return false;
        };
        if !self.viewport.focus(&trace.trace) {
            return false;
        }
        tracing::debug!("Focused {}", trace.label());
        self.viewport.clamp();
        self.redraw(surface);
        true
    }

    /// The recovery timer fired. Restores full detail if `handle` is still
    /// the pending timer.
    pub fn on_lod_timer(&mut self, handle: TimerHandle, surface: &mut impl ChartSurface) -> bool {
        if !self.lod.fire(handle) {
            return false;
        }
        surface.set_interactive(true);
        self.visibility
            .update(&self.traces, &self.viewport, self.lod.budget(), surface);
        true
    }

    pub fn clear_click_guard(&mut self) {
        self.input.clear_click_guard();
    }

    /// Background first, then the visible set.
    pub fn redraw(&mut self, surface: &mut impl ChartSurface) {
        self.background.redraw(&self.viewport, surface);
        self.visibility
            .update(&self.traces, &self.viewport, self.lod.budget(), surface);
    }

    fn degrade(&mut self, now: Instant, surface: &mut impl ChartSurface) -> TimerHandle {
        if self.lod.is_interactive() {
            surface.set_interactive(false);
        }
        self.lod.degrade(now)
    }
}
