// ============================================================================
// posebatch-core/src/external/ffmpeg.rs
// ============================================================================
//
// FFMPEG WRAPPERS: Frame Extraction and Frame-to-Video Merge
//
// Builders return the ToolCommand so callers and tests can inspect the exact
// command line; the wrappers add directory setup and run it. ffmpeg's exit
// status is reported as a warning only: a failed merge leaves whatever ffmpeg
// produced and the batch moves on.

use super::{CommandRunner, ToolCommand};
use crate::discovery::{frames_dir_for, merged_video_path_for};
use crate::error::CoreResult;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Filename pattern of extracted frames, numbered from 0.
pub const EXTRACT_FRAME_PATTERN: &str = "%04d.png";

/// Video codec of the merged result.
pub const MERGE_VIDEO_CODEC: &str = "libx264";

/// Pixel format of the merged result.
pub const MERGE_PIXEL_FORMAT: &str = "yuv420p";

/// `ffmpeg -i <video> -start_number 0 <frames_dir>/%04d.png`
pub fn build_extract_command(ffmpeg: &Path, video_path: &Path, frames_dir: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.arg("-i")
        .path_arg(video_path)
        .arg("-start_number")
        .arg("0")
        .path_arg(&frames_dir.join(EXTRACT_FRAME_PATTERN));
    cmd
}

/// `ffmpeg -r <rate> -pattern_type glob -i "<frames_dir>/*<suffix>" -c:v libx264 -pix_fmt yuv420p <output>`
pub fn build_merge_command(
    ffmpeg: &Path,
    frames_dir: &Path,
    frame_suffix: &str,
    frame_rate: u32,
    output_path: &Path,
) -> ToolCommand {
    let pattern = frames_dir.join(format!("*{frame_suffix}"));
    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.arg("-r")
        .arg(frame_rate.to_string())
        .arg("-pattern_type")
        .arg("glob")
        .arg("-i")
        .path_arg(&pattern)
        .arg("-c:v")
        .arg(MERGE_VIDEO_CODEC)
        .arg("-pix_fmt")
        .arg(MERGE_PIXEL_FORMAT)
        .path_arg(output_path);
    cmd
}

/// Decodes `video_path` into numbered PNG frames inside `frames_dir`.
///
/// Creates `frames_dir` first. Not part of a batch run; kept for preparing
/// frame folders by hand.
pub fn extract_frames<R: CommandRunner>(
    runner: &R,
    ffmpeg: &Path,
    video_path: &Path,
    frames_dir: &Path,
) -> CoreResult<()> {
    fs::create_dir_all(frames_dir)?;
    let cmd = build_extract_command(ffmpeg, video_path, frames_dir);
    let status = runner.run(&cmd)?;
    warn_on_failure("frame extraction", &status);
    Ok(())
}

/// Encodes the rendered frames of `video_name` into
/// `<output_dir>/<video_name>/<video_name>.mp4` and returns that path.
///
/// Frames are selected from `<output_dir>/<video_name>/frames` by
/// `frame_suffix`. An empty match is logged but ffmpeg still runs.
pub fn merge_frames<R: CommandRunner>(
    runner: &R,
    ffmpeg: &Path,
    video_name: impl AsRef<OsStr>,
    output_dir: &Path,
    frame_rate: u32,
    frame_suffix: &str,
) -> CoreResult<PathBuf> {
    let video_name = video_name.as_ref();
    let frames_dir = frames_dir_for(output_dir, video_name);
    let output_path = merged_video_path_for(output_dir, video_name);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let matched = count_frames_with_suffix(&frames_dir, frame_suffix);
    if matched == 0 {
        log::warn!(
            "No frames matching '*{}' in {}; the merged video will likely be empty",
            frame_suffix,
            frames_dir.display()
        );
    } else {
        log::debug!("Merging {} frame(s) for {}", matched, video_name.to_string_lossy());
    }

    let cmd = build_merge_command(ffmpeg, &frames_dir, frame_suffix, frame_rate, &output_path);
    let status = runner.run(&cmd)?;
    warn_on_failure("frame merge", &status);
    Ok(output_path)
}

/// Number of regular files in `dir` whose name ends with `suffix`.
/// A missing or unreadable directory counts as zero.
pub fn count_frames_with_suffix(dir: &Path, suffix: &str) -> usize {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return 0;
    };
    read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .count()
}

fn warn_on_failure(step: &str, status: &ExitStatus) {
    if !status.success() {
        log::warn!("ffmpeg {step} exited with {status}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_command_numbers_frames_from_zero() {
        let cmd = build_extract_command(
            Path::new("ffmpeg"),
            Path::new("videos/clip.mp4"),
            Path::new("frames/clip"),
        );
        assert_eq!(
            cmd.to_string(),
            "ffmpeg -i videos/clip.mp4 -start_number 0 frames/clip/%04d.png"
        );
    }

    #[test]
    fn merge_command_layout() {
        let cmd = build_merge_command(
            Path::new("ffmpeg"),
            Path::new("out/vidX/frames"),
            "pred_bedlam.jpg",
            60,
            Path::new("out/vidX/vidX.mp4"),
        );
        assert_eq!(
            cmd.to_string(),
            "ffmpeg -r 60 -pattern_type glob -i \"out/vidX/frames/*pred_bedlam.jpg\" \
             -c:v libx264 -pix_fmt yuv420p out/vidX/vidX.mp4"
        );
        assert_eq!(cmd.args.last().and_then(|a| a.to_str()), Some("out/vidX/vidX.mp4"));
    }

    #[test]
    fn count_frames_missing_dir_is_zero() {
        assert_eq!(count_frames_with_suffix(Path::new("no/such/dir"), ".jpg"), 0);
    }
}
