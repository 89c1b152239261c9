//! Core library for running a pose/mesh estimator over folders of video frames.
//!
//! A batch walks every frame folder under an input root in sorted order,
//! hands each one to an external estimator entry point (`demo` or `demox`),
//! and merges the rendered frames into an `.mp4` with ffmpeg.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use posebatch_core::config::BatchConfigBuilder;
//! use posebatch_core::external::{ScriptEstimator, SystemCommandRunner};
//! use posebatch_core::run_batch;
//! use std::path::PathBuf;
//!
//! let config = BatchConfigBuilder::new()
//!     .videos_dir(PathBuf::from("/data/rgb_png"))
//!     .output_dir(PathBuf::from("/runs/test0000"))
//!     .estimator("demox")
//!     .build()
//!     .unwrap();
//!
//! let estimator = ScriptEstimator::new("python", "/opt/bedlam");
//! let results = run_batch(&SystemCommandRunner, &estimator, &config, |_| {}).unwrap();
//! for result in results {
//!     println!("{} -> {}", result.video_name, result.video_path.display());
//! }
//! ```

pub mod config;
pub mod directories;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use config::{BatchConfig, BatchConfigBuilder, Detector};
pub use directories::{clean_directory, delete_directory};
pub use discovery::{VideoEntry, find_video_entries};
pub use error::{CoreError, CoreResult};
pub use external::{
    CommandRunner, Estimator, EstimatorArgs, EstimatorVariant, ScriptEstimator,
    SystemCommandRunner, ToolCommand, extract_frames, merge_frames,
};
pub use processing::{BatchEvent, VideoResult, run_batch};
pub use utils::format_elapsed;
