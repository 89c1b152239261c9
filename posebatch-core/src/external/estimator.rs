// ============================================================================
// posebatch-core/src/external/estimator.rs
// ============================================================================
//
// ESTIMATOR: Pose/Mesh Estimator Entry Points
//
// The estimator is an external program with two entry points, `demo` and
// `demox`. Each is handed a flat argument record describing one frame
// folder. This module owns the variant selection, that record, and the
// default implementation that runs an entry point as a script.

use super::{CommandRunner, SystemCommandRunner, ToolCommand};
use crate::config::{BatchConfig, Detector};
use crate::error::{CoreError, CoreResult};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default interpreter for the estimator scripts.
pub const DEFAULT_INTERPRETER: &str = "python";

/// The two estimator entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorVariant {
    Demo,
    Demox,
}

impl EstimatorVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            EstimatorVariant::Demo => "demo",
            EstimatorVariant::Demox => "demox",
        }
    }

    /// File name of the entry point script.
    pub fn script_name(self) -> String {
        format!("{}.py", self.as_str())
    }
}

impl fmt::Display for EstimatorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimatorVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(EstimatorVariant::Demo),
            "demox" => Ok(EstimatorVariant::Demox),
            other => Err(CoreError::UnknownEstimator(other.to_string())),
        }
    }
}

/// Arguments of one estimator call.
///
/// The field set is the estimator's fixed interface. The three evaluation
/// fields are always `None` in a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorArgs {
    pub cfg: PathBuf,
    pub ckpt: PathBuf,
    /// Frame folder to run on
    pub image_folder: PathBuf,
    /// Where rendered frames are written
    pub output_folder: PathBuf,
    pub tracker_batch_size: u32,
    pub detector: Detector,
    pub yolo_img_size: u32,
    pub display: bool,
    pub save_result: bool,
    pub eval_dataset: Option<String>,
    pub dataframe_path: Option<PathBuf>,
    pub data_split: Option<String>,
}

impl EstimatorArgs {
    /// Arguments for one frame folder, taking the shared options from `config`.
    pub fn for_folder(config: &BatchConfig, image_folder: &Path, output_folder: &Path) -> Self {
        Self {
            cfg: config.cfg.clone(),
            ckpt: config.ckpt.clone(),
            image_folder: image_folder.to_path_buf(),
            output_folder: output_folder.to_path_buf(),
            tracker_batch_size: config.tracker_batch_size,
            detector: config.detector,
            yolo_img_size: config.yolo_img_size,
            display: config.display,
            save_result: config.save_result,
            eval_dataset: None,
            dataframe_path: None,
            data_split: None,
        }
    }

    /// Appends the record to `cmd` as long flags.
    ///
    /// Booleans become bare flags when set; unset evaluation fields are
    /// omitted.
    pub fn append_to(&self, cmd: &mut ToolCommand) {
        cmd.arg("--cfg")
            .path_arg(&self.cfg)
            .arg("--ckpt")
            .path_arg(&self.ckpt)
            .arg("--image_folder")
            .path_arg(&self.image_folder)
            .arg("--output_folder")
            .path_arg(&self.output_folder)
            .arg("--tracker_batch_size")
            .arg(self.tracker_batch_size.to_string())
            .arg("--detector")
            .arg(self.detector.as_str())
            .arg("--yolo_img_size")
            .arg(self.yolo_img_size.to_string());

        if self.display {
            cmd.arg("--display");
        }
        if self.save_result {
            cmd.arg("--save_result");
        }
        if let Some(dataset) = &self.eval_dataset {
            cmd.arg("--eval_dataset").arg(dataset.as_str());
        }
        if let Some(path) = &self.dataframe_path {
            cmd.arg("--dataframe_path").path_arg(path);
        }
        if let Some(split) = &self.data_split {
            cmd.arg("--data_split").arg(split.as_str());
        }
    }
}

/// An estimator that can process one frame folder.
pub trait Estimator {
    /// Runs `variant` on `args`, blocking until it finishes.
    fn run(&self, variant: EstimatorVariant, args: &EstimatorArgs) -> CoreResult<()>;
}

/// Runs an entry point as `<interpreter> <script_dir>/<variant>.py <flags>`
/// from inside `script_dir`.
#[derive(Debug, Clone)]
pub struct ScriptEstimator<R: CommandRunner = SystemCommandRunner> {
    interpreter: String,
    script_dir: PathBuf,
    runner: R,
}

impl ScriptEstimator<SystemCommandRunner> {
    pub fn new(interpreter: impl Into<String>, script_dir: impl Into<PathBuf>) -> Self {
        Self::with_runner(interpreter, script_dir, SystemCommandRunner)
    }
}

impl<R: CommandRunner> ScriptEstimator<R> {
    pub fn with_runner(
        interpreter: impl Into<String>,
        script_dir: impl Into<PathBuf>,
        runner: R,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            script_dir: script_dir.into(),
            runner,
        }
    }

    /// The command line used for `variant` on `args`.
    pub fn build_command(&self, variant: EstimatorVariant, args: &EstimatorArgs) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.interpreter.as_str());
        cmd.path_arg(&self.script_dir.join(variant.script_name()));
        args.append_to(&mut cmd);
        cmd.current_dir(&self.script_dir);
        cmd
    }
}

impl<R: CommandRunner> Estimator for ScriptEstimator<R> {
    fn run(&self, variant: EstimatorVariant, args: &EstimatorArgs) -> CoreResult<()> {
        let cmd = self.build_command(variant, args);
        let status = self.runner.run(&cmd)?;
        if status.success() {
            Ok(())
        } else {
            Err(CoreError::EstimatorFailed {
                variant: variant.to_string(),
                folder: args.image_folder.display().to_string(),
                status,
            })
        }
    }
}
