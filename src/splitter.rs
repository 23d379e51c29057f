//! Interval splitter: distribute one call across wall-clock hour buckets
//!
//! Given a call's start and end in one time-zone view, [`split_by_hour`]
//! produces the sequence of hour-aligned buckets the call touches, with the
//! minutes of the call that fell inside each. The sum of the emitted
//! minutes always equals the call's duration; a call ending exactly on an
//! hour boundary never produces a trailing zero-minute bucket.

use chrono::{Duration, NaiveDateTime, Timelike};

/// Minutes of one call that fell within a single wall-clock hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourSlice {
    /// Start of the hour bucket, always aligned to :00
    pub bucket: NaiveDateTime,
    /// Minutes of the call inside this bucket, possibly fractional
    pub minutes: f64,
}

/// Truncate a timestamp to the hour boundary (XX:00:00)
pub fn truncate_to_hour(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("truncating to hour should always be valid")
}

/// Split a wall-clock interval across hour boundaries.
///
/// Walks the consecutive closed-open hour intervals from the hour
/// containing `start` through the hour containing `end`, emitting one
/// [`HourSlice`] per interval with strictly positive overlap.
///
/// Degenerate input (`end <= start`) yields no slices; the caller is
/// expected to have rejected such records upstream.
pub fn split_by_hour(start: NaiveDateTime, end: NaiveDateTime) -> Vec<HourSlice> {
    if end <= start {
        return Vec::new();
    }

    let mut slices = Vec::new();
    let mut bucket = truncate_to_hour(start);

    while bucket < end {
        let bucket_end = bucket + Duration::hours(1);
        let overlap_start = if start > bucket { start } else { bucket };
        let overlap_end = if end < bucket_end { end } else { bucket_end };

        let overlap_ms = (overlap_end - overlap_start).num_milliseconds();
        if overlap_ms > 0 {
            slices.push(HourSlice {
                bucket,
                minutes: overlap_ms as f64 / 60_000.0,
            });
        }

        bucket = bucket_end;
    }

    slices
}
