// posebatch-cli/src/config.rs
//
// Environment variable names and CLI-only defaults. Estimator and merge
// defaults live in posebatch_core::config.

/// Interpreter used to launch the estimator entry point.
pub const ENV_PYTHON: &str = "POSEBATCH_PYTHON";

/// Directory holding `demo.py` / `demox.py`.
pub const ENV_ESTIMATOR_DIR: &str = "POSEBATCH_ESTIMATOR_DIR";

/// ffmpeg binary used for merging and extraction.
pub const ENV_FFMPEG: &str = "POSEBATCH_FFMPEG";

pub const DEFAULT_ESTIMATOR_DIR: &str = ".";

/// Log directory name under the output root when `--log_dir` is not given.
pub const DEFAULT_LOG_SUBDIR: &str = "logs";

/// Prefix of the per-run log file name.
pub const LOG_FILE_PREFIX: &str = "posebatch_run";
