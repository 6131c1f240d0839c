use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading chart configuration.
///
/// Layout and viewport operations never fail; only the file boundary does.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid chart config in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
