//! Chart tuning, loadable from TOML
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! high_detail_budget = 1024
//! lod_recovery_ms = 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use crate::constants::*;
use crate::error::TimelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Trace budget while the view is at rest.
    pub high_detail_budget: usize,
    /// Trace budget while the user is panning or zooming.
    pub low_detail_budget: usize,
    /// Quiet period before returning to high detail.
    pub lod_recovery_ms: u64,
    pub drag_threshold_px: f64,
    pub min_trace_width_px: f64,
    /// Largest zoom step per wheel event, in binary orders of magnitude.
    pub zoom_step_limit: f64,
    pub initial_pixel_per_ms: f64,
    pub degenerate_pixel_per_ms: f64,
    pub ruler_height_px: f64,
    pub row_height_px: f64,
    pub overscan_px: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            high_detail_budget: HIGH_DETAIL_BUDGET,
            low_detail_budget: LOW_DETAIL_BUDGET,
            lod_recovery_ms: LOD_RECOVERY_MS,
            drag_threshold_px: DRAG_THRESHOLD,
            min_trace_width_px: MIN_TRACE_WIDTH,
            zoom_step_limit: ZOOM_STEP_LIMIT,
            initial_pixel_per_ms: INITIAL_PIXEL_PER_MS,
            degenerate_pixel_per_ms: DEGENERATE_PIXEL_PER_MS,
            ruler_height_px: RULER_HEIGHT,
            row_height_px: ROW_HEIGHT,
            overscan_px: OVERSCAN,
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(source: &str, path: &Path) -> Result<Self, TimelineError> {
        toml::from_str(source).map_err(|source| TimelineError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TimelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source, path)?;
        tracing::debug!("Loaded chart config from {}", path.display());
        Ok(config)
    }

    /// Like [`ChartConfig::load`], but logs the failure and falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{e}; using default chart config");
            Self::default()
        })
    }

    pub fn lod_recovery_delay(&self) -> Duration {
        Duration::from_millis(self.lod_recovery_ms)
    }

    /// Top edge of the row for `depth`.
    pub fn row_top(&self, depth: usize) -> f64 {
        self.ruler_height_px + depth as f64 * self.row_height_px
    }
}
