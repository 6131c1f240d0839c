//! Trace Timeline Core
//!
//! Stacks named time intervals into a flamegraph-style layout and drives an
//! interactive, budgeted view over them without depending on any UI toolkit

pub mod trace;
pub mod stack;
pub mod viewport;

// Per-frame rendering
pub mod visibility;
pub mod background;
pub mod render;
pub mod lod;
pub mod input;
pub mod chart;

// Settings
pub mod constants;
pub mod config;
mod error;

pub use chart::Chart;
pub use config::ChartConfig;
pub use error::TimelineError;
pub use lod::{LevelOfDetail, TimerHandle};
pub use render::{BackgroundSurface, ChartSurface, Placement, TraceSurface};
pub use trace::{StackedTrace, StackedTraces, Trace, TraceId};
pub use viewport::{TimeBounds, Viewport};
