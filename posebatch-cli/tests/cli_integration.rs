use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// Helper function to get the path to the compiled binary
fn posebatch_cmd() -> Command {
    Command::cargo_bin("posebatch").expect("Failed to find posebatch binary")
}

fn create_frame_folders(names: &[&str]) -> Result<TempDir, Box<dyn Error>> {
    let dir = tempdir()?;
    for name in names {
        fs::create_dir(dir.path().join(name))?;
        fs::write(dir.path().join(name).join("0000.png"), b"frame")?;
    }
    Ok(dir)
}

fn batch_cmd(videos: &Path, output: &Path) -> Command {
    let mut cmd = posebatch_cmd();
    cmd.arg("--videos_dirpath")
        .arg(videos)
        .arg("--output_dirpath")
        .arg(output)
        .env_remove("POSEBATCH_PYTHON")
        .env_remove("POSEBATCH_ESTIMATOR_DIR")
        .env_remove("POSEBATCH_FFMPEG");
    cmd
}

#[test]
fn test_unknown_demo_file_fails_with_status_and_timing() -> Result<(), Box<dyn Error>> {
    let videos = create_frame_folders(&["vidA"])?;
    let output = tempdir()?;

    batch_cmd(videos.path(), output.path())
        .arg("--demo_file_name")
        .arg("unknown")
        .arg("--ffmpeg")
        .arg("surely-not-an-ffmpeg-binary")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Program started at"))
        .stdout(contains("Error: Unknown demo file: unknown"))
        .stdout(contains("Program ended at"))
        .stdout(contains("Execution time:"));

    // Nothing was produced for the folder
    assert!(!output.path().join("vidA").exists());
    Ok(())
}

#[test]
fn test_invalid_detector_is_rejected_after_start_banner() {
    posebatch_cmd()
        .arg("--detector")
        .arg("ssd")
        .assert()
        .failure()
        .stdout(contains("Program started at"))
        .stderr(contains("invalid value"));
}

#[test]
fn test_missing_videos_dir_fails() -> Result<(), Box<dyn Error>> {
    let output = tempdir()?;
    let missing = output.path().join("no_such_root");

    batch_cmd(&missing, output.path())
        .assert()
        .failure()
        .stdout(contains("Error: Path error"))
        .stdout(contains("Execution time:"));
    Ok(())
}

#[test]
fn test_empty_root_succeeds() -> Result<(), Box<dyn Error>> {
    let videos = tempdir()?;
    let output = tempdir()?;

    batch_cmd(videos.path(), output.path())
        .arg("--ffmpeg")
        .arg("surely-not-an-ffmpeg-binary")
        .assert()
        .success()
        .stdout(contains("Program completed successfully!"));

    // The run log lands under <output>/logs
    let logs: Vec<_> = fs::read_dir(output.path().join("logs"))?.collect();
    assert_eq!(logs.len(), 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_batch_runs_every_folder_in_order() -> Result<(), Box<dyn Error>> {
    let videos = create_frame_folders(&["vidB", "vidA"])?;
    fs::write(videos.path().join("notes.txt"), b"not a folder")?;
    let output = tempdir()?;
    let log_dir = tempdir()?;

    let assert = batch_cmd(videos.path(), output.path())
        .arg("--python")
        .arg("true")
        .arg("--ffmpeg")
        .arg("true")
        .arg("--log_dir")
        .arg(log_dir.path())
        .assert()
        .success()
        .stdout(contains("Program completed successfully!"))
        .stdout(contains("Execution time:"))
        .stdout(contains("Processed 2 frame folder(s).").and(contains("notes").not()));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let first = stdout.find("[1/2] vidA").expect("vidA should be processed first");
    let second = stdout.find("[2/2] vidB").expect("vidB should be processed second");
    assert!(first < second);

    // merge creates the per-video directory even when no frames were rendered
    assert!(output.path().join("vidA").is_dir());
    assert!(output.path().join("vidB").is_dir());
    assert_eq!(fs::read_dir(log_dir.path())?.count(), 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_output_folder_alias() -> Result<(), Box<dyn Error>> {
    let videos = create_frame_folders(&["seq01"])?;
    let output = tempdir()?;

    posebatch_cmd()
        .arg("--videos_dirpath")
        .arg(videos.path())
        .arg("--output_folder")
        .arg(output.path())
        .arg("--python")
        .arg("true")
        .arg("--ffmpeg")
        .arg("true")
        .assert()
        .success();

    assert!(output.path().join("seq01").is_dir());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_estimator_failure_aborts_batch() -> Result<(), Box<dyn Error>> {
    let videos = create_frame_folders(&["vidA", "vidB"])?;
    let output = tempdir()?;

    batch_cmd(videos.path(), output.path())
        .arg("--python")
        .arg("false")
        .arg("--ffmpeg")
        .arg("true")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Error: Estimator 'demox' failed"))
        .stdout(contains("Execution time:"));

    // The first failure stops the batch before any merge
    assert!(!output.path().join("vidA").exists());
    assert!(!output.path().join("vidB").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_merge_subcommand_creates_video_dir() -> Result<(), Box<dyn Error>> {
    let output = tempdir()?;

    posebatch_cmd()
        .env_remove("POSEBATCH_FFMPEG")
        .arg("merge")
        .arg("--video_name")
        .arg("vid7")
        .arg("--output_dirpath")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg("true")
        .assert()
        .success()
        .stdout(contains("Program completed successfully!"));

    assert!(output.path().join("vid7").is_dir());
    Ok(())
}

#[test]
fn test_extract_missing_video_fails() -> Result<(), Box<dyn Error>> {
    let frames = tempdir()?;

    posebatch_cmd()
        .arg("extract")
        .arg("--video")
        .arg(frames.path().join("missing.mp4"))
        .arg("--frames_dirpath")
        .arg(frames.path().join("frames"))
        .assert()
        .failure()
        .stdout(contains("does not exist"));
    Ok(())
}
