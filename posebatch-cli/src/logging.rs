// ============================================================================
// posebatch-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and File Dispatch
//
// Console output is colored by level and written to stdout above the batch
// progress bar. When a log file is given, every record is also written
// there, timestamped and with terminal styling stripped. `--verbose` lowers
// the level from info to debug.

use crate::error::{CliErrorContext, CliResult};

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use std::fmt;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    posebatch_core::utils::file_timestamp()
}

/// Path of the log file for a run started now.
pub fn run_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!(
        "{}_{}.log",
        crate::config::LOG_FILE_PREFIX,
        get_timestamp()
    ))
}

/// Renders a log message without ANSI styling.
pub fn plain_text(message: &fmt::Arguments<'_>) -> String {
    strip_ansi_escapes::strip_str(message.to_string())
}

/// Installs the global logger. Call once per process.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> CliResult<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            if record.level() == log::Level::Info {
                out.finish(format_args!("{message}"))
            } else {
                out.finish(format_args!("[{}] {}", colors.color(record.level()), message))
            }
        })
        .chain(fern::Output::call(|record| {
            crate::progress::print_above_bar(&record.args().to_string())
        }));

    let mut dispatch = fern::Dispatch::new().level(level).chain(console);

    if let Some(path) = log_file {
        let file = fern::log_file(path)
            .cli_with_context(|| format!("Failed to open log file {}", path.display()))?;
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] {}: {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.target(),
                        plain_text(message)
                    ))
                })
                .chain(file),
        );
    }

    dispatch
        .apply()
        .map_err(|e| crate::cli_error!("Failed to initialize logging: {}", e))
}
