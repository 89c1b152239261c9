// ============================================================================
// posebatch-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Batch progress bar driven by core batch events
//
// Console log lines are printed through `print_above_bar`, which hides the
// active bar while the line is written. The estimator and ffmpeg still write
// straight to the terminal, so the bar is only redrawn between folders.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use posebatch_core::BatchEvent;
use posebatch_core::utils::format_elapsed;

use crate::terminal;

use std::sync::Mutex;

// Bar that console output must be printed above, if a batch is running
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn set_active_bar(bar: Option<ProgressBar>) {
    if let Ok(mut active) = ACTIVE_BAR.lock() {
        *active = bar;
    }
}

/// Prints one console line to stdout, suspending the active progress bar
/// around it.
pub fn print_above_bar(line: &str) {
    let bar = ACTIVE_BAR.lock().ok().and_then(|active| active.clone());
    match bar {
        Some(bar) => bar.suspend(|| println!("{line}")),
        None => println!("{line}"),
    }
}

const BAR_TEMPLATE: &str = "{prefix:.bold} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// Turns [`BatchEvent`]s into a progress bar and status lines.
#[derive(Default)]
pub struct BatchProgress {
    bar: Option<ProgressBar>,
    hidden: bool,
}

impl BatchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that never draws a bar (status lines are still logged).
    pub fn hidden() -> Self {
        Self { bar: None, hidden: true }
    }

    pub fn handle(&mut self, event: BatchEvent<'_>) {
        match event {
            BatchEvent::Discovered { total } => {
                terminal::print_status("Frame folders", &total.to_string(), true);
                if total > 0 {
                    let bar = self.create_bar(total as u64);
                    if !self.hidden {
                        set_active_bar(Some(bar.clone()));
                    }
                    self.bar = Some(bar);
                }
            }
            BatchEvent::VideoStarted { index, total, video_name } => {
                terminal::print_processing(&format!("[{}/{}] {}", index + 1, total, video_name));
                if let Some(bar) = &self.bar {
                    bar.set_message(video_name.to_string());
                }
            }
            BatchEvent::VideoFinished { index, total, video_name, elapsed } => {
                terminal::print_success(&format!(
                    "{} merged in {}",
                    video_name,
                    format_elapsed(elapsed)
                ));
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                    if index + 1 == total {
                        bar.finish_with_message("done");
                        self.release();
                    }
                }
            }
        }
    }

    /// Leaves the bar where a failed batch stopped it.
    pub fn abandon(&self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.abandon_with_message("aborted");
            }
        }
        self.release();
    }

    /// Position of the bar, if one was created.
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }

    /// Whether the bar was finished or abandoned.
    pub fn is_finished(&self) -> Option<bool> {
        self.bar.as_ref().map(ProgressBar::is_finished)
    }

    fn release(&self) {
        if self.bar.is_some() && !self.hidden {
            set_active_bar(None);
        }
    }

    fn create_bar(&self, total: u64) -> ProgressBar {
        let bar = if self.hidden {
            ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new(total)
        };
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>.");
        bar.set_style(style);
        bar.set_prefix("Batch");
        bar
    }
}

impl Drop for BatchProgress {
    fn drop(&mut self) {
        self.release();
    }
}
