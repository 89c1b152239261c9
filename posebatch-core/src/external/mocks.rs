// posebatch-core/src/external/mocks.rs

// --- Recording test doubles for the external process seams ---
//
// Only compiled with the "test-mocks" feature; the crate enables it for its
// own tests through a dev-dependency on itself.

use super::{CommandRunner, Estimator, EstimatorArgs, EstimatorVariant, ToolCommand};
use crate::error::{CoreError, CoreResult};

use std::cell::RefCell;
use std::fs;
use std::process::ExitStatus;

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    // Raw wait status: exit code in the high byte.
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Records every command instead of running it.
///
/// Commands whose rendered form contains a registered pattern exit with the
/// registered code; everything else exits 0.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    exit_codes: RefCell<Vec<(String, i32)>>,
    received: RefCell<Vec<ToolCommand>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_with(&self, pattern: &str, code: i32) {
        self.exit_codes.borrow_mut().push((pattern.to_string(), code));
    }

    pub fn received_commands(&self) -> Vec<ToolCommand> {
        self.received.borrow().clone()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, cmd: &ToolCommand) -> CoreResult<ExitStatus> {
        self.received.borrow_mut().push(cmd.clone());
        let rendered = cmd.to_string();
        let code = self
            .exit_codes
            .borrow()
            .iter()
            .find(|(pattern, _)| rendered.contains(pattern.as_str()))
            .map_or(0, |(_, code)| *code);
        log::debug!("MockCommandRunner: {rendered} -> {code}");
        Ok(exit_status(code))
    }
}

/// Records estimator calls and optionally writes fake rendered frames.
#[derive(Debug, Default)]
pub struct MockEstimator {
    calls: RefCell<Vec<(EstimatorVariant, EstimatorArgs)>>,
    fail_on: RefCell<Option<String>>,
    rendered_frames: RefCell<Option<(usize, String)>>,
}

impl MockEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes calls whose image folder ends with `folder_name` fail.
    pub fn fail_on(&self, folder_name: &str) {
        *self.fail_on.borrow_mut() = Some(folder_name.to_string());
    }

    /// Writes `count` empty files named `NNNN_<suffix>` into each output folder.
    pub fn render_frames(&self, count: usize, suffix: &str) {
        *self.rendered_frames.borrow_mut() = Some((count, suffix.to_string()));
    }

    pub fn calls(&self) -> Vec<(EstimatorVariant, EstimatorArgs)> {
        self.calls.borrow().clone()
    }

    /// Image folder names in call order.
    pub fn called_folders(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|(_, args)| args.image_folder.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect()
    }
}

impl Estimator for MockEstimator {
    fn run(&self, variant: EstimatorVariant, args: &EstimatorArgs) -> CoreResult<()> {
        self.calls.borrow_mut().push((variant, args.clone()));

        if let Some(name) = self.fail_on.borrow().as_deref() {
            if args.image_folder.ends_with(name) {
                return Err(CoreError::EstimatorFailed {
                    variant: variant.to_string(),
                    folder: args.image_folder.display().to_string(),
                    status: exit_status(1),
                });
            }
        }

        if let Some((count, suffix)) = self.rendered_frames.borrow().as_ref() {
            fs::create_dir_all(&args.output_folder)?;
            for i in 0..*count {
                fs::write(args.output_folder.join(format!("{i:04}_{suffix}")), b"")?;
            }
        }
        Ok(())
    }
}
