//! Command-line arguments for the timeline binary
//
// Usage: `some-app | timeline [-v|--verbose] [--config <path>]`

use std::path::PathBuf;
use anyhow::{Context, Result};
use timeline_core::ChartConfig;

/// Result of parsing command-line arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl ParsedArgs {
    /// The chart config to use.
    ///
    /// An explicit `--config` must load. Otherwise `timeline.toml` in the user
    /// config directory is used if present, falling back to defaults.
    pub fn load_config(&self) -> Result<ChartConfig> {
        if let Some(path) = &self.config {
            return ChartConfig::load(path)
                .with_context(|| format!("Failed to load --config {}", path.display()));
        }

        let default_path = crate::project_dirs()?.config_dir().join("timeline.toml");
        if default_path.exists() {
            Ok(ChartConfig::load_or_default(&default_path))
        } else {
            tracing::debug!("No config at {}, using defaults", default_path.display());
            Ok(ChartConfig::default())
        }
    }
}

/// Parse the process arguments.
pub fn parse_args() -> Result<ParsedArgs> {
    parse_from(std::env::args().skip(1))
}

pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<ParsedArgs> {
    let mut parsed = ParsedArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => parsed.verbose = true,
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            other => match other.strip_prefix("--config=") {
                Some(path) => parsed.config = Some(PathBuf::from(path)),
                None => anyhow::bail!("Unknown argument: '{}'", other),
            },
        }
    }
    Ok(parsed)
}
