// posebatch-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.
//
// Running `posebatch` with no subcommand starts a batch. Long flag names
// keep their underscores (`--videos_dirpath`, `--demo_file_name`, ...) so
// existing launch scripts keep working.

use clap::{Args, Parser, Subcommand};
use posebatch_core::config::{
    DEFAULT_CFG, DEFAULT_CKPT, DEFAULT_ESTIMATOR, DEFAULT_FFMPEG, DEFAULT_FRAME_RATE,
    DEFAULT_FRAME_SUFFIX, DEFAULT_OUTPUT_DIR, DEFAULT_TRACKER_BATCH_SIZE, DEFAULT_VIDEOS_DIR,
    DEFAULT_YOLO_IMG_SIZE,
};
use posebatch_core::external::estimator::DEFAULT_INTERPRETER;
use std::path::PathBuf;

use crate::config::{DEFAULT_ESTIMATOR_DIR, ENV_ESTIMATOR_DIR, ENV_FFMPEG, ENV_PYTHON};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Posebatch: batch pose estimation over video frame folders",
    long_about = "Runs a pose/mesh estimator over every frame folder under an input root \
                  and merges the rendered frames of each folder into an mp4 with ffmpeg.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Enable debug-level logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts every frame of a video into numbered PNGs
    Extract(ExtractArgs),
    /// Merges one folder's rendered frames into an mp4
    Merge(MergeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Estimator config file
    #[arg(long, value_name = "CFG", default_value = DEFAULT_CFG)]
    pub cfg: PathBuf,

    /// Estimator checkpoint
    #[arg(long, value_name = "CKPT", default_value = DEFAULT_CKPT)]
    pub ckpt: PathBuf,

    /// Root directory holding one frame folder per video
    #[arg(long = "videos_dirpath", value_name = "DIR", default_value = DEFAULT_VIDEOS_DIR)]
    pub videos_dirpath: PathBuf,

    /// Root directory for per-video outputs
    #[arg(
        long = "output_dirpath",
        visible_alias = "output_folder",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dirpath: PathBuf,

    /// Batch size of the person tracker
    #[arg(
        long = "tracker_batch_size",
        value_name = "N",
        default_value_t = DEFAULT_TRACKER_BATCH_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub tracker_batch_size: u32,

    /// Visualize results while the estimator runs
    #[arg(long)]
    pub display: bool,

    /// Person detector
    #[arg(long, value_name = "DETECTOR", default_value = "yolo", value_parser = ["yolo", "maskrcnn"])]
    pub detector: String,

    /// Input size of the YOLO detector
    #[arg(
        long = "yolo_img_size",
        value_name = "PX",
        default_value_t = DEFAULT_YOLO_IMG_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub yolo_img_size: u32,

    /// Estimator entry point: demo or demox
    #[arg(long = "demo_file_name", value_name = "NAME", default_value = DEFAULT_ESTIMATOR)]
    pub demo_file_name: String,

    /// Ask the estimator to save its raw results
    #[arg(long = "save_result")]
    pub save_result: bool,

    /// Frame rate of the merged video
    #[arg(
        long = "frame_rate",
        value_name = "FPS",
        default_value_t = DEFAULT_FRAME_RATE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub frame_rate: u32,

    /// File name suffix of rendered frames picked up by the merge
    #[arg(long = "frame_suffix", value_name = "SUFFIX", default_value = DEFAULT_FRAME_SUFFIX)]
    pub frame_suffix: String,

    /// Interpreter used to launch the estimator entry point
    #[arg(long, value_name = "PATH", env = ENV_PYTHON, default_value = DEFAULT_INTERPRETER)]
    pub python: String,

    /// Directory holding demo.py and demox.py
    #[arg(long = "estimator_dir", value_name = "DIR", env = ENV_ESTIMATOR_DIR, default_value = DEFAULT_ESTIMATOR_DIR)]
    pub estimator_dir: PathBuf,

    /// ffmpeg binary
    #[arg(long, value_name = "PATH", env = ENV_FFMPEG, default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,

    /// Optional: Directory for log files (defaults to OUTPUT_DIR/logs)
    #[arg(long = "log_dir", value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Video file to split into frames
    #[arg(long, value_name = "FILE", required = true)]
    pub video: PathBuf,

    /// Directory receiving 0001.png, 0002.png, ...
    #[arg(long = "frames_dirpath", value_name = "DIR", required = true)]
    pub frames_dirpath: PathBuf,

    /// ffmpeg binary
    #[arg(long, value_name = "PATH", env = ENV_FFMPEG, default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Name of the folder under OUTPUT_DIR to merge
    #[arg(long = "video_name", value_name = "NAME", required = true)]
    pub video_name: String,

    /// Root directory for per-video outputs
    #[arg(
        long = "output_dirpath",
        visible_alias = "output_folder",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dirpath: PathBuf,

    /// Frame rate of the merged video
    #[arg(
        long = "frame_rate",
        value_name = "FPS",
        default_value_t = DEFAULT_FRAME_RATE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub frame_rate: u32,

    /// File name suffix of rendered frames picked up by the merge
    #[arg(long = "frame_suffix", value_name = "SUFFIX", default_value = DEFAULT_FRAME_SUFFIX)]
    pub frame_suffix: String,

    /// ffmpeg binary
    #[arg(long, value_name = "PATH", env = ENV_FFMPEG, default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,
}
