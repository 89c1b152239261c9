// ============================================================================
// posebatch-core/src/processing/batch.rs
// ============================================================================
//
// BATCH DRIVER: Estimator + Merge over Every Frame Folder
//
// WORKFLOW:
// 1. Resolve the estimator variant (unknown names fail here, before any
//    folder is touched)
// 2. Discover frame folders under the input root, sorted by name
// 3. For each folder, in order:
//    a. Point the estimator at the folder and at <output>/<name>/frames
//    b. Run the estimator and wait for it
//    c. Merge the rendered frames into <output>/<name>/<name>.mp4
//
// The first error ends the batch. Folders after the failing one are not
// processed and nothing is retried.

use crate::config::BatchConfig;
use crate::discovery::find_video_entries;
use crate::error::CoreResult;
use crate::external::{CommandRunner, Estimator, EstimatorArgs, EstimatorVariant, merge_frames};

use log::{debug, info, warn};

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Outcome of one processed frame folder.
#[derive(Debug, Clone)]
pub struct VideoResult {
    pub video_name: String,
    /// Where the estimator wrote rendered frames
    pub frames_dir: PathBuf,
    /// The merged `.mp4`
    pub video_path: PathBuf,
    /// Wall-clock time spent on this folder (estimator + merge)
    pub duration: Duration,
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    /// Discovery finished
    Discovered { total: usize },
    /// About to run the estimator on folder `index` (0-based)
    VideoStarted { index: usize, total: usize, video_name: &'a str },
    /// Folder `index` finished its merge
    VideoFinished { index: usize, total: usize, video_name: &'a str, elapsed: Duration },
}

/// Runs the estimator and the frame merge for every frame folder under
/// `config.videos_dir`, strictly one after another.
///
/// Returns one [`VideoResult`] per folder, in processing order. The first
/// error aborts the batch and is returned as-is.
///
/// # Examples
///
/// ```rust,no_run
/// use posebatch_core::config::BatchConfigBuilder;
/// use posebatch_core::external::{ScriptEstimator, SystemCommandRunner};
/// use posebatch_core::run_batch;
/// use std::path::PathBuf;
///
/// let config = BatchConfigBuilder::new()
///     .videos_dir(PathBuf::from("/data/rgb_png"))
///     .output_dir(PathBuf::from("/runs/test0000"))
///     .build()
///     .unwrap();
/// let estimator = ScriptEstimator::new("python", "/opt/bedlam");
///
/// let results = run_batch(&SystemCommandRunner, &estimator, &config, |_| {}).unwrap();
/// println!("Merged {} video(s)", results.len());
/// ```
pub fn run_batch<R, E, F>(
    runner: &R,
    estimator: &E,
    config: &BatchConfig,
    mut on_event: F,
) -> CoreResult<Vec<VideoResult>>
where
    R: CommandRunner,
    E: Estimator,
    F: FnMut(BatchEvent<'_>),
{
    let variant: EstimatorVariant = config.estimator.parse()?;
    debug!("Estimator entry point: {variant}");

    let entries = find_video_entries(&config.videos_dir)?;
    let total = entries.len();
    info!(
        "Found {} frame folder(s) in {}",
        total,
        config.videos_dir.display()
    );
    on_event(BatchEvent::Discovered { total });

    if entries.is_empty() {
        warn!("No frame folders found in {}", config.videos_dir.display());
        return Ok(Vec::new());
    }

    let mut results = Vec::with_capacity(total);

    for (index, entry) in entries.iter().enumerate() {
        let start = Instant::now();
        let video_name = entry.name.as_str();
        on_event(BatchEvent::VideoStarted { index, total, video_name });
        info!("Processing: {} ({}/{})", video_name, index + 1, total);

        let frames_dir = entry.frames_output_dir(&config.output_dir);
        let args = EstimatorArgs::for_folder(config, &entry.path, &frames_dir);
        debug!("Estimator args for {video_name}: {args:?}");

        estimator.run(variant, &args)?;

        let video_path = merge_frames(
            runner,
            &config.ffmpeg_path,
            &entry.stem,
            &config.output_dir,
            config.frame_rate,
            &config.frame_suffix,
        )?;

        let elapsed = start.elapsed();
        info!("Finished {} -> {}", video_name, video_path.display());
        on_event(BatchEvent::VideoFinished { index, total, video_name, elapsed });

        results.push(VideoResult {
            video_name: entry.name.clone(),
            frames_dir,
            video_path,
            duration: elapsed,
        });
    }

    Ok(results)
}
