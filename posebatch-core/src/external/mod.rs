// ============================================================================
// posebatch-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External Processes
//
// Everything posebatch delegates lives behind this module: ffmpeg for frame
// extraction and merging, and the estimator entry points. Commands are
// described as plain data (ToolCommand) and executed through the
// CommandRunner trait so the batch driver can be exercised with recording
// mocks instead of real processes.
//
// KEY COMPONENTS:
// - ToolCommand: program, arguments and working directory of one invocation
// - CommandRunner / SystemCommandRunner: blocking process execution
// - check_dependency: verifies a tool can be started
// - ffmpeg: extract/merge command builders and wrappers
// - estimator: variant selection and the estimator argument contract

use crate::error::{CoreError, CoreResult, command_start_error};

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

pub mod estimator;
pub mod ffmpeg;
#[cfg(feature = "test-mocks")]
pub mod mocks;

pub use estimator::{Estimator, EstimatorArgs, EstimatorVariant, ScriptEstimator};
pub use ffmpeg::{build_extract_command, build_merge_command, extract_frames, merge_frames};

// ============================================================================
// COMMAND DESCRIPTION
// ============================================================================

/// A single external program invocation.
///
/// Program and arguments are kept as `OsString` so paths reach the child
/// process byte for byte. Only `Display` converts lossily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
    /// Working directory; inherits the current one when `None`
    pub current_dir: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends a path argument unchanged.
    pub fn path_arg(&mut self, path: &Path) -> &mut Self {
        self.args.push(path.as_os_str().to_os_string());
        self
    }

    pub fn current_dir(&mut self, dir: &Path) -> &mut Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Program name for messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Raw value following `flag`, if present.
    pub fn os_value_of(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }

    /// Value following `flag`, if present and valid UTF-8.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.os_value_of(flag).and_then(OsStr::to_str)
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

/// Renders the command the way it would be typed in a shell.
///
/// Arguments holding whitespace or glob characters are double-quoted so a
/// pattern such as `frames/*pred_bedlam.jpg` shows up exactly as ffmpeg
/// receives it.
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_if_needed(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote_if_needed(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

fn quote_if_needed(s: &str) -> String {
    if s.is_empty() || s.chars().any(|c| c.is_whitespace() || matches!(c, '*' | '?' | '[')) {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

// ============================================================================
// COMMAND EXECUTION
// ============================================================================

/// Something that can run a [`ToolCommand`] to completion.
pub trait CommandRunner {
    /// Runs the command, blocking until it exits.
    ///
    /// A command that cannot be started is an error; a command that starts
    /// and exits non-zero is reported through the returned status.
    fn run(&self, cmd: &ToolCommand) -> CoreResult<ExitStatus>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, cmd: &ToolCommand) -> CoreResult<ExitStatus> {
        (**self).run(cmd)
    }
}

/// Runs commands with `std::process::Command`, inheriting stdio so the
/// tool's own output reaches the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, cmd: &ToolCommand) -> CoreResult<ExitStatus> {
        log::info!("{cmd}");

        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        if let Some(dir) = &cmd.current_dir {
            command.current_dir(dir);
        }

        command.status().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                log::error!("Command '{}' not found", cmd.program_name());
                CoreError::DependencyNotFound(cmd.program_name())
            } else {
                log::error!("Failed to start '{}': {}", cmd.program_name(), e);
                command_start_error(cmd.program_name(), e)
            }
        })
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `cmd_name` can be started by running it with `-version`.
///
/// Only the ability to start the process is checked, not its exit status.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(command_start_error(cmd_name, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_globs_and_spaces() {
        let mut cmd = ToolCommand::new("ffmpeg");
        cmd.arg("-i").arg("out/frames/*pred_bedlam.jpg").arg("my clip.mp4");
        assert_eq!(
            cmd.to_string(),
            "ffmpeg -i \"out/frames/*pred_bedlam.jpg\" \"my clip.mp4\""
        );
    }

    #[test]
    fn value_of_returns_following_argument() {
        let mut cmd = ToolCommand::new("ffmpeg");
        cmd.arg("-r").arg("30").arg("-c:v").arg("libx264");
        assert_eq!(cmd.value_of("-r"), Some("30"));
        assert_eq!(cmd.value_of("-c:v"), Some("libx264"));
        assert_eq!(cmd.value_of("-pix_fmt"), None);
        assert!(cmd.has_arg("libx264"));
    }

    #[cfg(unix)]
    #[test]
    fn path_args_keep_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let folder = Path::new(OsStr::from_bytes(b"/in/vid\xff"));
        let mut cmd = ToolCommand::new("python");
        cmd.arg("--image_folder").path_arg(folder);

        assert_eq!(cmd.os_value_of("--image_folder"), Some(folder.as_os_str()));
        assert_eq!(cmd.value_of("--image_folder"), None);
        assert!(cmd.to_string().starts_with("python --image_folder /in/vid"));
    }

    #[test]
    fn missing_program_is_dependency_error() {
        let cmd = ToolCommand::new("surely-not-a-real-binary-posebatch");
        let err = SystemCommandRunner.run(&cmd).unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(_)));
    }

    #[test]
    fn check_dependency_reports_missing_tool() {
        let err = check_dependency("surely-not-a-real-binary-posebatch").unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(name) if name.contains("posebatch")));
    }
}
