//! Timeline Chart UI
//!
//! gpui host for the trace timeline: a pannable, zoomable stack of labelled
//! trace bars over a tiled millisecond ruler

use directories::ProjectDirs;

pub mod args;
pub mod logging;
pub mod window;

mod colors;
mod surface;
mod timeline_view;

pub use surface::{GpuiSurface, TraceElement};
pub use timeline_view::TimelineView;
pub use window::TimelineWindow;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Per-user directories for logs and the default config file.
pub fn project_dirs() -> anyhow::Result<ProjectDirs> {
    ProjectDirs::from("com", "Pulsar", "Pulsar_Timeline")
        .ok_or_else(|| anyhow::anyhow!("Could not determine app data directory"))
}
