// posebatch-cli/src/commands/extract.rs
//
// Splits one video into numbered PNG frames, producing a frame folder that a
// later batch can pick up.

use crate::cli::ExtractArgs;
use crate::error::CliResult;
use crate::logging;
use crate::terminal;

use posebatch_core::{SystemCommandRunner, extract_frames};

/// Runs the extract command.
pub fn run_extract(args: ExtractArgs, verbose: bool) -> CliResult<()> {
    logging::init_logging(verbose, None)?;

    if !args.video.is_file() {
        return Err(crate::cli_error!(
            "Input video '{}' does not exist",
            args.video.display()
        ));
    }

    terminal::print_section("Extract");
    terminal::print_status("Video", &args.video.display().to_string(), false);
    terminal::print_status("Frames", &args.frames_dirpath.display().to_string(), false);

    extract_frames(&SystemCommandRunner, &args.ffmpeg, &args.video, &args.frames_dirpath)?;
    terminal::print_success("Frames extracted");
    Ok(())
}
