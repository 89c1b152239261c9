// ============================================================================
// posebatch-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for BatchConfig
//
// Fluent construction of BatchConfig starting from the defaults in
// config/mod.rs. `build()` validates the result.

use std::path::PathBuf;

use super::{BatchConfig, Detector};
use crate::error::CoreResult;

/// Builder for creating [`BatchConfig`] instances.
#[derive(Debug, Clone, Default)]
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory of frame folders.
    pub fn videos_dir(mut self, videos_dir: PathBuf) -> Self {
        self.config.videos_dir = videos_dir;
        self
    }

    /// Sets the root directory for per-video results.
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.config.output_dir = output_dir;
        self
    }

    pub fn cfg(mut self, cfg: PathBuf) -> Self {
        self.config.cfg = cfg;
        self
    }

    pub fn ckpt(mut self, ckpt: PathBuf) -> Self {
        self.config.ckpt = ckpt;
        self
    }

    pub fn tracker_batch_size(mut self, size: u32) -> Self {
        self.config.tracker_batch_size = size;
        self
    }

    pub fn detector(mut self, detector: Detector) -> Self {
        self.config.detector = detector;
        self
    }

    pub fn yolo_img_size(mut self, size: u32) -> Self {
        self.config.yolo_img_size = size;
        self
    }

    pub fn display(mut self, display: bool) -> Self {
        self.config.display = display;
        self
    }

    pub fn save_result(mut self, save_result: bool) -> Self {
        self.config.save_result = save_result;
        self
    }

    /// Sets the estimator entry point name (`demo` or `demox`).
    pub fn estimator(mut self, name: &str) -> Self {
        self.config.estimator = name.to_string();
        self
    }

    /// Sets the frame rate of the merged video.
    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.config.frame_rate = frame_rate;
        self
    }

    /// Sets the filename suffix used to select rendered frames.
    pub fn frame_suffix(mut self, suffix: &str) -> Self {
        self.config.frame_suffix = suffix.to_string();
        self
    }

    pub fn ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.config.ffmpeg_path = path;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> CoreResult<BatchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn builder_overrides_defaults() {
        let config = BatchConfigBuilder::new()
            .videos_dir(PathBuf::from("in"))
            .output_dir(PathBuf::from("out"))
            .tracker_batch_size(4)
            .detector(Detector::MaskRcnn)
            .yolo_img_size(608)
            .display(true)
            .save_result(true)
            .estimator("demo")
            .frame_suffix("pred.jpg")
            .build()
            .unwrap();

        assert_eq!(config.videos_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.tracker_batch_size, 4);
        assert_eq!(config.detector, Detector::MaskRcnn);
        assert_eq!(config.yolo_img_size, 608);
        assert!(config.display);
        assert!(config.save_result);
        assert_eq!(config.estimator, "demo");
        assert_eq!(config.frame_suffix, "pred.jpg");
        assert_eq!(config.frame_rate, super::super::DEFAULT_FRAME_RATE);
    }

    #[test]
    fn build_fails_on_invalid_values() {
        let result = BatchConfigBuilder::new().tracker_batch_size(0).build();
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
