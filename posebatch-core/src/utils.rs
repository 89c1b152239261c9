//! Utility functions for formatting elapsed time and timestamps.

use chrono::{DateTime, TimeZone};

use std::time::Duration;

/// Timestamp format of the run banner, e.g. `18/10/2026 03:04:05 PM`.
pub const BANNER_TIME_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// Formats an elapsed time as `H:MM:SS.ffffff` (hours unpadded, microsecond
/// precision), e.g. 3725.5s -> "1:02:05.500000".
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    let micros = elapsed.subsec_micros();
    format!("{hours}:{minutes:02}:{secs:02}.{micros:06}")
}

/// Formats a point in time for the start/end banner.
#[must_use]
pub fn format_banner_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(BANNER_TIME_FORMAT).to_string()
}

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
#[must_use]
pub fn file_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}
