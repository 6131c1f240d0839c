//! Pointer gesture tracking: click versus drag
//!
//! A press becomes a drag once the pointer travels past the threshold. The
//! drag is anchored to the time under the cursor at press, so the content
//! follows the pointer exactly. Releasing a drag raises a click guard that
//! swallows the click the platform delivers right after, until the host
//! clears it on the next tick.

use crate::config::ChartConfig;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    Pressed { origin_x: f64, origin_ms: f64 },
    Dragging { origin_ms: f64 },
}

#[derive(Debug)]
pub struct InputRouter {
    gesture: Gesture,
    click_guard: bool,
    drag_threshold_px: f64,
}

impl InputRouter {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            click_guard: false,
            drag_threshold_px: config.drag_threshold_px,
        }
    }

    pub fn pointer_down(&mut self, x: f64, viewport: &Viewport) {
        self.gesture = Gesture::Pressed {
            origin_x: x,
            origin_ms: viewport.x_to_time(x),
        };
        self.click_guard = false;
    }

    /// Returns the pan delta in pixels while dragging.
    pub fn pointer_move(&mut self, x: f64, viewport: &Viewport) -> Option<f64> {
        let origin_ms = match self.gesture {
            Gesture::Idle => return None,
            Gesture::Pressed { origin_x, origin_ms } => {
                if (x - origin_x).abs() <= self.drag_threshold_px {
                    return None;
                }
                tracing::trace!("Drag started at {origin_x}px");
                self.gesture = Gesture::Dragging { origin_ms };
                origin_ms
            }
            Gesture::Dragging { origin_ms } => origin_ms,
        };
        Some(x - viewport.time_to_x(origin_ms))
    }

    /// Ends the gesture. Returns `true` if it was a drag, in which case the
    /// next click is suppressed until [`InputRouter::clear_click_guard`].
    pub fn pointer_up(&mut self) -> bool {
        let was_drag = self.is_dragging();
        if was_drag {
            self.click_guard = true;
        }
        self.gesture = Gesture::Idle;
        was_drag
    }

    /// Whether a click arriving now should focus its trace.
    pub fn accept_click(&self) -> bool {
        !self.click_guard && !self.is_dragging()
    }

    pub fn clear_click_guard(&mut self) {
        self.click_guard = false;
    }

    pub fn click_guarded(&self) -> bool {
        self.click_guard
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_pressed(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }
}
