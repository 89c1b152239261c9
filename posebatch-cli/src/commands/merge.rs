// posebatch-cli/src/commands/merge.rs
//
// Re-runs the merge step for a single folder, e.g. after the estimator was
// run by hand.

use crate::cli::MergeArgs;
use crate::error::CliResult;
use crate::logging;
use crate::terminal;

use posebatch_core::{SystemCommandRunner, merge_frames};

/// Runs the merge command.
pub fn run_merge(args: MergeArgs, verbose: bool) -> CliResult<()> {
    logging::init_logging(verbose, None)?;

    terminal::print_section("Merge");
    terminal::print_status("Video name", &args.video_name, true);
    terminal::print_status("Output", &args.output_dirpath.display().to_string(), false);

    let video_path = merge_frames(
        &SystemCommandRunner,
        &args.ffmpeg,
        &args.video_name,
        &args.output_dirpath,
        args.frame_rate,
        &args.frame_suffix,
    )?;
    terminal::print_success(&format!("Merged into {}", video_path.display()));
    Ok(())
}
