use std::time::Instant;
use gpui::*;
use timeline_core::background::Line;
use timeline_core::constants::{MS_PER_TICK, MS_PER_TILE};
use timeline_core::{Chart, ChartConfig, TimerHandle, Trace, TraceId};
use crate::colors;
use crate::surface::{GpuiSurface, TiledBand, TraceElement};

const STATUS_BAR_HEIGHT: f32 = 24.0;
/// Zoom per pixel of vertical wheel travel, in binary orders of magnitude.
const WHEEL_ZOOM_PER_PIXEL: f64 = 0.01;
/// Pixels per line for wheels that report whole lines.
const WHEEL_LINE_HEIGHT: f32 = 20.0;
/// Background lines closer together than this are skipped.
const MIN_LINE_SPACING: f64 = 4.0;

fn to_f64(value: Pixels) -> f64 {
    let value: f32 = value.into();
    value as f64
}

/// Chart-relative rectangle in window coordinates.
fn rect(bounds: Bounds<Pixels>, x: f64, y: f64, width: f64, height: f64) -> Bounds<Pixels> {
    Bounds {
        origin: point(
            bounds.origin.x + px(x as f32),
            bounds.origin.y + px(y as f32),
        ),
        size: size(px(width as f32), px(height as f32)),
    }
}

fn paint_band(bounds: Bounds<Pixels>, band: &TiledBand, window: &mut Window) {
    let width = to_f64(bounds.size.width);
    let (top, bottom) = (band.rows.start, band.rows.end);
    if bottom <= top {
        return;
    }
    let tile = &band.tile;
    window.paint_quad(fill(
        rect(bounds, 0.0, top, width, bottom - top),
        colors::background_color(tile.fill),
    ));

    // Also rejects NaN widths.
    if !(tile.width >= MIN_LINE_SPACING) || tile.height < 1.0 {
        return;
    }
    let ticks_per_tile = MS_PER_TILE / MS_PER_TICK;
    let draw_ticks = tile.width / ticks_per_tile >= MIN_LINE_SPACING;

    let mut column = band.phase_px;
    while column < width {
        for line in tile.lines.iter().filter(|l| l.x0 == l.x1) {
            if !draw_ticks && line.x0 > 1.0 {
                continue;
            }
            let x = column + line.x0 - 0.5;
            if x < -1.0 || x > width {
                continue;
            }
            let color = colors::background_color(line.color);
            if line.y0 <= 0.0 && line.y1 >= tile.height {
                window.paint_quad(fill(rect(bounds, x, top, 1.0, bottom - top), color));
            } else {
                let mut row = top;
                while row < bottom {
                    let length = (line.y1 - line.y0).min(bottom - row - line.y0);
                    if length > 0.0 {
                        window.paint_quad(fill(rect(bounds, x, row + line.y0, 1.0, length), color));
                    }
                    row += tile.height;
                }
            }
        }
        column += tile.width;
    }

    let mut row = top;
    while row < bottom {
        for line in tile.lines.iter().filter(|l| l.y0 == l.y1) {
            let y = row + line.y0 - 0.5;
            if y < bottom {
                let color = colors::background_color(line.color);
                window.paint_quad(fill(rect(bounds, 0.0, y, width, 1.0), color));
            }
        }
        row += tile.height;
    }
}

fn paint_line(bounds: Bounds<Pixels>, line: &Line, window: &mut Window) {
    let color = colors::background_color(line.color);
    let segment = if line.y0 == line.y1 {
        rect(bounds, line.x0.min(line.x1), line.y0 - 0.5, (line.x1 - line.x0).abs(), 1.0)
    } else {
        rect(bounds, line.x0 - 0.5, line.y0.min(line.y1), 1.0, (line.y1 - line.y0).abs())
    };
    window.paint_quad(fill(segment, color));
}

pub struct TimelineView {
    chart: Chart,
    surface: GpuiSurface,
    row_height: f64,
    chart_size: Option<(f64, f64)>,
    hovered: Option<TraceId>,
    _lod_task: Option<Task<()>>,
}

impl TimelineView {
    pub fn new(traces: Vec<Trace>, config: ChartConfig) -> Self {
        tracing::info!("Opening timeline with {} traces", traces.len());
        Self {
            chart: Chart::new(&traces, &config),
            surface: GpuiSurface::new(),
            row_height: config.row_height_px,
            chart_size: None,
            hovered: None,
            _lod_task: None,
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Resize the chart to the window, minus the status bar.
    fn sync_size(&mut self, window: &Window) {
        let viewport = window.viewport_size();
        let width = to_f64(viewport.width);
        let height = (to_f64(viewport.height) - STATUS_BAR_HEIGHT as f64).max(0.0);
        if self.chart_size == Some((width, height)) {
            return;
        }
        tracing::debug!("Chart resized to {width}x{height}");
        self.chart_size = Some((width, height));
        self.chart.on_resize(width, height, &mut self.surface);
    }

    /// Replace the recovery task; dropping the old one cancels it.
    fn schedule_recovery(&mut self, handle: TimerHandle, cx: &mut Context<Self>) {
        let delay = handle.remaining(Instant::now());
        self._lod_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;
            let _ = cx.update(|cx| {
                if let Some(this) = this.upgrade() {
                    this.update(cx, |view, cx| {
                        if view.chart.on_lod_timer(handle, &mut view.surface) {
                            cx.notify();
                        }
                    });
                }
            });
        }));
    }

    fn finish_drag(&mut self, cx: &mut Context<Self>) {
        if !self.chart.on_drag_end() {
            return;
        }
        // The click for this release arrives first; clear the guard right after.
        cx.spawn(async move |this, cx| {
            let _ = cx.update(|cx| {
                if let Some(this) = this.upgrade() {
                    this.update(cx, |view, _cx| view.chart.clear_click_guard());
                }
            });
        })
        .detach();
    }

    fn render_trace(&self, element: &TraceElement, interactive: bool, cx: &mut Context<Self>) -> AnyElement {
        let placement = element.placement;
        let bar = div()
            .id(("trace", element.id.index()))
            .absolute()
            .left(px(placement.left_px as f32))
            .right(px(placement.right_px as f32))
            .top(px(placement.top_px as f32))
            .h(px(self.row_height as f32 - 1.0))
            .px_1()
            .overflow_hidden()
            .whitespace_nowrap()
            .text_xs()
            .text_color(colors::label_color())
            .bg(colors::domain_color(element.domain.as_deref()))
            .border_1()
            .border_color(colors::trace_border_color())
            .child(element.label.clone());

        if !interactive {
            return bar.into_any_element();
        }

        let id = element.id;
        bar.cursor_pointer()
            .on_click(cx.listener(move |view, _event: &ClickEvent, _window, cx| {
                if view.chart.on_click(id, &mut view.surface) {
                    cx.notify();
                }
            }))
            .on_hover(cx.listener(move |view, hovered: &bool, _window, cx| {
                if *hovered {
                    view.hovered = Some(id);
                } else if view.hovered == Some(id) {
                    view.hovered = None;
                }
                cx.notify();
            }))
            .into_any_element()
    }

    fn render_background(&self) -> impl IntoElement {
        let bands = self.surface.bands().to_vec();
        let strokes = self.surface.strokes().to_vec();

        canvas(
            |_bounds, _window, _cx| {},
            move |bounds, _, window, _cx| {
                window.paint_layer(bounds, |window| {
                    for band in &bands {
                        paint_band(bounds, band, window);
                    }
                    for line in &strokes {
                        paint_line(bounds, line, window);
                    }
                });
            },
        )
        .absolute()
        .size_full()
    }

    fn render_status_bar(&self) -> impl IntoElement {
        let text: SharedString = match self.hovered.and_then(|id| self.surface.element(id)) {
            Some(element) => element.tooltip.clone(),
            None => {
                let viewport = self.chart.viewport();
                format!(
                    "Traces: {}  Visible: {}  Detail: {:?}  Scale: {:.4} px/ms",
                    self.chart.traces().len(),
                    self.chart.visible().len(),
                    self.chart.level_of_detail(),
                    viewport.pixel_per_ms()
                )
                .into()
            }
        };

        div()
            .h(px(STATUS_BAR_HEIGHT))
            .w_full()
            .flex()
            .items_center()
            .px_4()
            .bg(colors::status_bar_color())
            .text_sm()
            .text_color(colors::status_text_color())
            .child(text)
    }
}

impl Render for TimelineView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.sync_size(window);

        let interactive = self.surface.is_interactive();
        let bars: Vec<AnyElement> = self
            .surface
            .elements()
            .map(|element| self.render_trace(element, interactive, cx))
            .collect();

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(rgb(0xffffff))
            .child(
                div()
                    .relative()
                    .flex_1()
                    .w_full()
                    .overflow_hidden()
                    .child(self.render_background())
                    .children(bars)
                    .on_mouse_down(MouseButton::Left, cx.listener(|view, event: &MouseDownEvent, _window, _cx| {
                        view.chart.on_drag_start(to_f64(event.position.x));
                    }))
                    .on_mouse_move(cx.listener(|view, event: &MouseMoveEvent, _window, cx| {
                        let x = to_f64(event.position.x);
                        if let Some(handle) = view.chart.on_drag_move(x, Instant::now(), &mut view.surface) {
                            view.schedule_recovery(handle, cx);
                            cx.notify();
                        }
                    }))
                    .on_mouse_up(MouseButton::Left, cx.listener(|view, _event: &MouseUpEvent, _window, cx| {
                        view.finish_drag(cx);
                    }))
                    .on_mouse_up_out(MouseButton::Left, cx.listener(|view, _event: &MouseUpEvent, _window, cx| {
                        view.finish_drag(cx);
                    }))
                    .on_scroll_wheel(cx.listener(|view, event: &ScrollWheelEvent, _window, cx| {
                        let delta = event.delta.pixel_delta(px(WHEEL_LINE_HEIGHT));
                        let zoom = to_f64(delta.y) * WHEEL_ZOOM_PER_PIXEL;
                        let x = to_f64(event.position.x);
                        if let Some(handle) = view.chart.on_wheel(x, zoom, Instant::now(), &mut view.surface) {
                            view.schedule_recovery(handle, cx);
                            cx.notify();
                        }
                    })),
            )
            .child(self.render_status_bar())
    }
}
