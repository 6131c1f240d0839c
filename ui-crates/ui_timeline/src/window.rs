use anyhow::Context as _;
use gpui::*;
use timeline_core::{ChartConfig, Trace};
use crate::TimelineView;

pub struct TimelineWindow;

impl TimelineWindow {
    /// Open a window charting `traces`.
    pub fn open(
        traces: Vec<Trace>,
        config: ChartConfig,
        cx: &mut App,
    ) -> anyhow::Result<WindowHandle<TimelineView>> {
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds {
                origin: point(px(100.0), px(100.0)),
                size: size(px(1200.0), px(600.0)),
            })),
            titlebar: Some(TitlebarOptions {
                title: Some("Timeline".into()),
                appears_transparent: false,
                traffic_light_position: None,
            }),
            window_background: WindowBackgroundAppearance::Opaque,
            focus: true,
            show: true,
            kind: WindowKind::Normal,
            is_movable: true,
            is_minimizable: true,
            is_resizable: true,
            window_decorations: None,
            display_id: None,
            window_min_size: Some(size(px(320.0), px(160.0))),
            tabbing_identifier: None,
            app_id: None,
        };

        cx.open_window(window_options, |_window, cx| {
            cx.new(|_cx| TimelineView::new(traces, config))
        })
        .context("Failed to open timeline window")
    }
}
