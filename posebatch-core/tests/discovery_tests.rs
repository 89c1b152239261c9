// posebatch-core/tests/discovery_tests.rs

use posebatch_core::discovery::find_video_entries;
use posebatch_core::error::CoreError;
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_find_video_entries_sorted_directories_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    fs::create_dir(root.join("vidA"))?;
    fs::create_dir(root.join("vidC"))?;
    fs::create_dir(root.join("vidB"))?;
    File::create(root.join("notes.txt"))?; // Plain files are skipped
    fs::create_dir(root.join("vidB").join("nested"))?; // Only the top level counts

    let entries = find_video_entries(root)?;
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["vidA", "vidB", "vidC"]);
    assert_eq!(entries[1].path, root.join("vidB"));

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_video_entries_uses_folder_stem() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("clip.v2"))?;

    let entries = find_video_entries(dir.path())?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "clip");

    Ok(())
}

#[test]
fn test_find_video_entries_empty_root() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("only_a_file.png"))?;

    let entries = find_video_entries(dir.path())?;
    assert!(entries.is_empty());

    Ok(())
}

#[test]
fn test_find_video_entries_nonexistent_dir() {
    let non_existent_path = PathBuf::from("surely_this_does_not_exist_42_integration");
    let result = find_video_entries(&non_existent_path);
    match result {
        Err(CoreError::PathError(msg)) => assert!(msg.contains("surely_this_does_not_exist_42")),
        other => panic!("Unexpected result: {:?}", other),
    }
}
