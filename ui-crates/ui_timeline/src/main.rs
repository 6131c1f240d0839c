//! `some-app | timeline`
//!
//! Echoes the piped log to stdout, collects every timeline line, and opens a
//! chart of the collected traces once the input ends.

use std::io;
use anyhow::Result;
use gpui::*;
use ui_timeline::{args, logging, TimelineWindow, APP_NAME, APP_VERSION};

fn main() -> Result<()> {
    let parsed = args::parse_args()?;
    let _log_guard = logging::init(parsed.verbose)?;
    tracing::info!("{} v{}", APP_NAME, APP_VERSION);

    let config = parsed.load_config()?;

    let mut traces = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        timeline_log::collect_from_reader(stdin.lock(), stdout.lock())?
    };
    timeline_log::add_root_line(&mut traces);

    Application::new().run(move |cx: &mut App| {
        cx.activate(true);
        if let Err(e) = TimelineWindow::open(traces, config, cx) {
            tracing::error!("{:#}", e);
            cx.quit();
        }
    });

    Ok(())
}
