//! Logging setup for the timeline viewer
//
// Every run writes `logs/<timestamp>/timeline.log` under the app data
// directory. With `--verbose` a coloured console layer is added on stderr,
// since stdout carries the echoed log stream.
//
// Usage:
//   Call `logging::init(verbose)` at the start of main().
//   Keep the returned guard alive for the program's duration.

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::Subscriber;
use tracing_subscriber::fmt::{
    format::{FormatEvent, FormatFields, Writer},
    FmtContext,
};
use tracing_subscriber::registry::LookupSpan;

const DEFAULT_FILTER: &str = "info,wgpu_hal=warn,wgpu_core=warn,naga=warn";

/// Flushes the file log on drop.
#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Folder for one run's logs.
pub fn run_log_folder(logs_dir: &Path, started: DateTime<Local>) -> PathBuf {
    logs_dir.join(started.format("%Y-%m-%d_%H-%M-%S").to_string())
}

/// Initializes logging.
///
/// - `verbose`: adds the coloured console layer.
/// - Returns: LogGuard, which must be kept alive for file logging.
pub fn init(verbose: bool) -> Result<LogGuard> {
    let logs_dir = crate::project_dirs()?.data_dir().join("logs");
    let log_folder = run_log_folder(&logs_dir, Local::now());
    fs::create_dir_all(&log_folder)
        .with_context(|| format!("Failed to create log folder {}", log_folder.display()))?;

    let log_path = log_folder.join("timeline.log");
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {} for writing", log_path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    use tracing_subscriber::prelude::*;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    // File log: plain formatting, no ANSI codes
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if verbose {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .event_format(ConsoleFormatter);
        registry.with(console_layer).init();
    } else {
        registry.init();
    }

    tracing::debug!("Logging to {}", log_path.display());
    Ok(LogGuard(guard))
}

/// Coloured single-line console output.
pub struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        use std::fmt::Write as _;
        let meta = event.metadata();
        let (level_str, level_color) = match *meta.level() {
            tracing::Level::ERROR => ("ERROR", "\x1b[1;91m"), // Bold Red
            tracing::Level::WARN => ("WARN ", "\x1b[1;93m"),  // Bold Yellow
            tracing::Level::INFO => ("INFO ", "\x1b[1;94m"),  // Bold Blue
            tracing::Level::DEBUG => ("DEBUG", "\x1b[1;92m"), // Bold Green
            tracing::Level::TRACE => ("TRACE", "\x1b[1;95m"), // Bold Magenta
        };
        write!(writer, "\x1b[2;36m{}\x1b[0m ", Local::now().format("%H:%M:%S%.3f"))?;
        write!(writer, "{}{}\x1b[0m ", level_color, level_str)?;
        write!(writer, "\x1b[4;2;33m{}\x1b[0m: ", meta.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_run_log_folder_is_timestamped() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let folder = run_log_folder(Path::new("/tmp/logs"), started);
        assert_eq!(folder, Path::new("/tmp/logs/2024-03-09_14-05-07"));
    }
}
