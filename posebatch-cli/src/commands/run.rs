// ============================================================================
// posebatch-cli/src/commands/run.rs
// ============================================================================
//
// BATCH COMMAND: Estimator + Merge over Every Frame Folder
//
// Resolves the input/output roots, sets up console and file logging, checks
// that ffmpeg can be started, and hands the batch to posebatch-core.

use crate::cli::RunArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::logging;
use crate::progress::BatchProgress;
use crate::terminal;

use posebatch_core::config::{BatchConfig, BatchConfigBuilder};
use posebatch_core::external::check_dependency;
use posebatch_core::{CoreError, ScriptEstimator, SystemCommandRunner, run_batch};

use log::{info, warn};

use std::fs;
use std::path::{self, Path, PathBuf};

/// Paths derived from the arguments before anything runs.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub videos_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl RunPaths {
    /// Makes the roots absolute so they stay valid inside the estimator's
    /// working directory.
    pub fn resolve(args: &RunArgs) -> CliResult<Self> {
        let videos_dir = path::absolute(&args.videos_dirpath).cli_with_context(|| {
            format!("Invalid videos path '{}'", args.videos_dirpath.display())
        })?;
        let output_dir = path::absolute(&args.output_dirpath).cli_with_context(|| {
            format!("Invalid output path '{}'", args.output_dirpath.display())
        })?;
        let log_dir = args
            .log_dir
            .clone()
            .unwrap_or_else(|| output_dir.join(crate::config::DEFAULT_LOG_SUBDIR));
        Ok(Self {
            videos_dir,
            output_dir,
            log_dir,
        })
    }
}

/// Builds the core configuration for a batch.
pub fn build_config(args: &RunArgs, paths: &RunPaths) -> CliResult<BatchConfig> {
    BatchConfigBuilder::new()
        .videos_dir(paths.videos_dir.clone())
        .output_dir(paths.output_dir.clone())
        .cfg(args.cfg.clone())
        .ckpt(args.ckpt.clone())
        .tracker_batch_size(args.tracker_batch_size)
        .detector(args.detector.parse()?)
        .yolo_img_size(args.yolo_img_size)
        .display(args.display)
        .save_result(args.save_result)
        .estimator(&args.demo_file_name)
        .frame_rate(args.frame_rate)
        .frame_suffix(&args.frame_suffix)
        .ffmpeg_path(args.ffmpeg.clone())
        .build()
}

/// Runs the batch command.
pub fn run_batch_command(args: RunArgs, verbose: bool) -> CliResult<()> {
    let paths = RunPaths::resolve(&args)?;

    fs::create_dir_all(&paths.log_dir).cli_with_context(|| {
        format!("Failed to create log directory {}", paths.log_dir.display())
    })?;
    let log_path = logging::run_log_path(&paths.log_dir);
    logging::init_logging(verbose, Some(&log_path))?;

    let config = build_config(&args, &paths)?;
    print_run_summary(&args, &paths, &log_path);

    check_ffmpeg(&config.ffmpeg_path);

    let estimator = ScriptEstimator::new(args.python.as_str(), args.estimator_dir.clone());
    let mut progress = BatchProgress::new();

    terminal::print_section("Processing");
    let outcome = run_batch(&SystemCommandRunner, &estimator, &config, |event| {
        progress.handle(event)
    });
    let results = match outcome {
        Ok(results) => results,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    terminal::print_section("Summary");
    if results.is_empty() {
        warn!("No frame folders were processed.");
    }
    for result in &results {
        terminal::print_status(&result.video_name, &result.video_path.display().to_string(), false);
    }
    info!("Processed {} frame folder(s).", results.len());
    Ok(())
}

fn print_run_summary(args: &RunArgs, paths: &RunPaths, log_path: &Path) {
    terminal::print_section("Posebatch");
    terminal::print_status("Videos", &paths.videos_dir.display().to_string(), false);
    terminal::print_status("Output", &paths.output_dir.display().to_string(), false);
    terminal::print_status("Log file", &log_path.display().to_string(), false);
    terminal::print_status("Estimator", &args.demo_file_name, true);
    terminal::print_status("Detector", &args.detector, false);
    terminal::print_status("Frame rate", &args.frame_rate.to_string(), false);
}

/// A missing ffmpeg is reported but does not stop the batch; each merge then
/// fails on its own.
fn check_ffmpeg(ffmpeg: &Path) {
    match check_dependency(&ffmpeg.to_string_lossy()) {
        Ok(()) => terminal::print_success("ffmpeg found"),
        Err(CoreError::DependencyNotFound(name)) => {
            warn!("'{name}' was not found; merging will fail for every folder")
        }
        Err(e) => warn!("Could not check ffmpeg: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn run_args(extra: &[&str]) -> RunArgs {
        let argv = ["posebatch", "--videos_dirpath", "/in", "--output_dirpath", "/out"];
        Cli::try_parse_from(argv.iter().chain(extra.iter()).copied())
            .expect("arguments should parse")
            .run
    }

    #[test]
    fn test_log_dir_defaults_under_output() {
        let paths = RunPaths::resolve(&run_args(&[])).unwrap();
        assert_eq!(paths.log_dir, PathBuf::from("/out/logs"));
    }

    #[test]
    fn test_relative_roots_become_absolute() {
        let args = run_args(&["--output_dirpath", "runs/test0000"]);
        let paths = RunPaths::resolve(&args).unwrap();
        assert!(paths.output_dir.is_absolute());
        assert!(paths.output_dir.ends_with("runs/test0000"));
    }

    #[test]
    fn test_build_config_carries_flags() {
        let args = run_args(&["--detector", "maskrcnn", "--demo_file_name", "demo", "--frame_rate", "25"]);
        let paths = RunPaths::resolve(&args).unwrap();
        let config = build_config(&args, &paths).unwrap();
        assert_eq!(config.detector.as_str(), "maskrcnn");
        assert_eq!(config.estimator, "demo");
        assert_eq!(config.frame_rate, 25);
        assert_eq!(config.videos_dir, PathBuf::from("/in"));
    }

    #[test]
    fn test_build_config_keeps_unknown_estimator_for_the_batch() {
        let args = run_args(&["--demo_file_name", "unknown"]);
        let paths = RunPaths::resolve(&args).unwrap();
        assert_eq!(build_config(&args, &paths).unwrap().estimator, "unknown");
    }
}
