//! Output directory helpers.
//!
//! Utility API for callers that want a fresh output tree. The batch driver
//! itself never deletes anything.

use crate::error::CoreResult;

use std::fs;
use std::path::Path;

/// Removes `dir` and everything below it. Does nothing if `dir` is absent.
pub fn delete_directory(dir: &Path) -> CoreResult<()> {
    if dir.exists() {
        log::debug!("Removing directory tree {}", dir.display());
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}

/// Deletes `dir` if present, then recreates it with its parents.
///
/// On success `dir` exists and is empty.
pub fn clean_directory(dir: &Path) -> CoreResult<()> {
    delete_directory(dir)?;
    fs::create_dir_all(dir)?;
    Ok(())
}
