//! Configuration structures and constants for the posebatch-core library.
//!
//! This module holds the run-wide options of a batch: input and output
//! roots, the options forwarded to the estimator, and the settings of the
//! frame merge step.

mod builder;

use crate::error::{CoreError, CoreResult};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use builder::BatchConfigBuilder;

// Default constants

/// Default estimator config file, relative to the estimator directory.
pub const DEFAULT_CFG: &str = "configs/demo_bedlam_cliff_x.yaml";

/// Default model checkpoint, relative to the estimator directory.
pub const DEFAULT_CKPT: &str = "data/ckpt/bedlam_cliff_x.ckpt";

/// Default root directory holding one frame folder per video.
pub const DEFAULT_VIDEOS_DIR: &str = "../../../../../databases/Spree01/data/rgb_png";

/// Default root directory for per-video results.
pub const DEFAULT_OUTPUT_DIR: &str = "../runs/testing/test0000";

/// Default batch size of the detector used for bbox tracking.
pub const DEFAULT_TRACKER_BATCH_SIZE: u32 = 1;

/// Default input image size for the yolo detector.
pub const DEFAULT_YOLO_IMG_SIZE: u32 = 416;

/// Default estimator entry point.
pub const DEFAULT_ESTIMATOR: &str = "demox";

/// Frame rate of the merged result video.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Filename suffix of the rendered frames the estimator writes.
pub const DEFAULT_FRAME_SUFFIX: &str = "pred_bedlam.jpg";

/// Default ffmpeg binary, resolved through `PATH`.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Object detector used by the estimator for bbox tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detector {
    #[default]
    Yolo,
    MaskRcnn,
}

impl Detector {
    pub fn as_str(self) -> &'static str {
        match self {
            Detector::Yolo => "yolo",
            Detector::MaskRcnn => "maskrcnn",
        }
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Detector {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yolo" => Ok(Detector::Yolo),
            "maskrcnn" => Ok(Detector::MaskRcnn),
            other => Err(CoreError::Config(format!(
                "unknown detector '{other}' (expected 'yolo' or 'maskrcnn')"
            ))),
        }
    }
}

/// Run-wide configuration of a batch.
///
/// Built by the CLI from its arguments and handed to
/// [`run_batch`](crate::processing::run_batch). Every video entry in the
/// batch shares these settings; nothing here changes between entries.
///
/// # Examples
///
/// ```rust
/// use posebatch_core::config::BatchConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = BatchConfigBuilder::new()
///     .videos_dir(PathBuf::from("/data/rgb_png"))
///     .output_dir(PathBuf::from("/runs/test0000"))
///     .estimator("demo")
///     .frame_rate(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.frame_rate, 30);
/// ```
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory whose immediate subdirectories are frame folders
    pub videos_dir: PathBuf,

    /// Directory receiving `<video_name>/frames` and `<video_name>/<video_name>.mp4`
    pub output_dir: PathBuf,

    /// Estimator config file defining model hyperparams
    pub cfg: PathBuf,

    /// Estimator checkpoint
    pub ckpt: PathBuf,

    /// Batch size of the object detector used for bbox tracking
    pub tracker_batch_size: u32,

    /// Object detector used for bbox tracking
    pub detector: Detector,

    /// Input image size for the yolo detector
    pub yolo_img_size: u32,

    /// Visualize the 3d body projection on each image
    pub display: bool,

    /// Save verts, joints and 2d joints for evaluation
    pub save_result: bool,

    /// Estimator entry point name, `demo` or `demox`.
    /// Kept as given; resolved when the batch starts.
    pub estimator: String,

    /// Frame rate of the merged video
    pub frame_rate: u32,

    /// Suffix matched when globbing rendered frames for the merge
    pub frame_suffix: String,

    /// ffmpeg binary
    pub ffmpeg_path: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            videos_dir: PathBuf::from(DEFAULT_VIDEOS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            cfg: PathBuf::from(DEFAULT_CFG),
            ckpt: PathBuf::from(DEFAULT_CKPT),
            tracker_batch_size: DEFAULT_TRACKER_BATCH_SIZE,
            detector: Detector::default(),
            yolo_img_size: DEFAULT_YOLO_IMG_SIZE,
            display: false,
            save_result: false,
            estimator: DEFAULT_ESTIMATOR.to_string(),
            frame_rate: DEFAULT_FRAME_RATE,
            frame_suffix: DEFAULT_FRAME_SUFFIX.to_string(),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG),
        }
    }
}

impl BatchConfig {
    /// Checks the numeric and string settings for values no run can use.
    ///
    /// The estimator name is not checked here: an unknown name is reported
    /// by the batch driver as [`CoreError::UnknownEstimator`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.frame_rate == 0 {
            return Err(CoreError::Config("frame rate must be greater than 0".to_string()));
        }
        if self.tracker_batch_size == 0 {
            return Err(CoreError::Config(
                "tracker batch size must be greater than 0".to_string(),
            ));
        }
        if self.yolo_img_size == 0 {
            return Err(CoreError::Config(
                "yolo image size must be greater than 0".to_string(),
            ));
        }
        if self.frame_suffix.trim().is_empty() {
            return Err(CoreError::Config("frame suffix must not be empty".to_string()));
        }
        if self.videos_dir.as_os_str().is_empty() || self.output_dir.as_os_str().is_empty() {
            return Err(CoreError::Config(
                "videos and output directories must be set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BatchConfig::default();
        assert_eq!(config.cfg, PathBuf::from("configs/demo_bedlam_cliff_x.yaml"));
        assert_eq!(config.ckpt, PathBuf::from("data/ckpt/bedlam_cliff_x.ckpt"));
        assert_eq!(config.tracker_batch_size, 1);
        assert_eq!(config.detector, Detector::Yolo);
        assert_eq!(config.yolo_img_size, 416);
        assert_eq!(config.estimator, "demox");
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.frame_suffix, "pred_bedlam.jpg");
        assert!(!config.display);
        assert!(!config.save_result);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn detector_round_trips_through_names() {
        assert_eq!("yolo".parse::<Detector>().unwrap(), Detector::Yolo);
        assert_eq!("maskrcnn".parse::<Detector>().unwrap(), Detector::MaskRcnn);
        assert_eq!(Detector::MaskRcnn.to_string(), "maskrcnn");
        assert!("ssd".parse::<Detector>().is_err());
    }

    #[test]
    fn validate_rejects_zero_frame_rate() {
        let config = BatchConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn validate_rejects_blank_suffix() {
        let config = BatchConfig {
            frame_suffix: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_does_not_judge_estimator_name() {
        let config = BatchConfig {
            estimator: "unknown".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
