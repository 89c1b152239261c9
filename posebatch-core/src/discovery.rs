//! Frame folder discovery.
//!
//! A batch input root holds one subdirectory per video, each containing the
//! frames decoded from that video. Only the top level of the root is
//! scanned; plain files next to the frame folders are ignored.

use crate::error::{CoreError, CoreResult};

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// One frame folder found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    /// Folder stem for messages, lossily decoded
    pub name: String,
    /// Folder stem as found on disk; names everything the batch writes
    pub stem: OsString,
    /// Path of the frame folder
    pub path: PathBuf,
}

impl VideoEntry {
    /// Directory the estimator writes rendered frames into.
    pub fn frames_output_dir(&self, output_dir: &Path) -> PathBuf {
        frames_dir_for(output_dir, &self.stem)
    }

    /// Path of the merged video.
    pub fn merged_video_path(&self, output_dir: &Path) -> PathBuf {
        merged_video_path_for(output_dir, &self.stem)
    }
}

/// `<output_dir>/<video_name>/frames`
pub fn frames_dir_for(output_dir: &Path, video_name: impl AsRef<OsStr>) -> PathBuf {
    output_dir.join(video_name.as_ref()).join("frames")
}

/// `<output_dir>/<video_name>/<video_name>.mp4`
pub fn merged_video_path_for(output_dir: &Path, video_name: impl AsRef<OsStr>) -> PathBuf {
    let video_name = video_name.as_ref();
    let mut file_name = video_name.to_os_string();
    file_name.push(".mp4");
    output_dir.join(video_name).join(file_name)
}

/// Finds the frame folders directly under `videos_dir`, sorted by path.
///
/// The entry name is the folder's file stem, so `clip.v2` is named `clip`.
/// An empty result is not an error.
///
/// # Examples
///
/// ```rust,no_run
/// use posebatch_core::find_video_entries;
/// use std::path::Path;
///
/// for entry in find_video_entries(Path::new("/data/rgb_png")).unwrap() {
///     println!("{} -> {}", entry.name, entry.path.display());
/// }
/// ```
pub fn find_video_entries(videos_dir: &Path) -> CoreResult<Vec<VideoEntry>> {
    if !videos_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Videos directory '{}' does not exist or is not a directory",
            videos_dir.display()
        )));
    }

    let mut dirs: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(videos_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            log::debug!("Skipping non-directory entry {}", path.display());
        }
    }
    dirs.sort();

    dirs.into_iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .ok_or_else(|| {
                    CoreError::PathError(format!(
                        "Failed to get folder name for {}",
                        path.display()
                    ))
                })?
                .to_os_string();
            let name = stem.to_string_lossy().into_owned();
            Ok(VideoEntry { name, stem, path })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_follow_layout() {
        let root = Path::new("/runs/test0000");
        assert_eq!(
            frames_dir_for(root, "vidA"),
            PathBuf::from("/runs/test0000/vidA/frames")
        );
        assert_eq!(
            merged_video_path_for(root, "vidA"),
            PathBuf::from("/runs/test0000/vidA/vidA.mp4")
        );
    }

    #[cfg(unix)]
    #[test]
    fn output_paths_keep_non_utf8_stem() {
        use std::os::unix::ffi::OsStrExt;

        let stem = OsStr::from_bytes(b"vid\xff");
        let root = Path::new("/runs");
        assert_eq!(
            frames_dir_for(root, stem),
            root.join(stem).join("frames")
        );
        let merged = merged_video_path_for(root, stem);
        assert_eq!(merged.parent(), Some(root.join(stem).as_path()));
        assert_eq!(merged.file_name().unwrap().as_bytes(), b"vid\xff.mp4");
    }

    #[test]
    fn entry_frames_dir_uses_name() {
        let entry = VideoEntry {
            name: "seq01".to_string(),
            stem: OsString::from("seq01"),
            path: PathBuf::from("/in/seq01"),
        };
        assert_eq!(
            entry.frames_output_dir(Path::new("out")),
            PathBuf::from("out/seq01/frames")
        );
        assert_eq!(
            entry.merged_video_path(Path::new("out")),
            PathBuf::from("out/seq01/seq01.mp4")
        );
    }
}
