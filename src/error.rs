//! Error types for callgrid
//!
//! This module defines the error types used throughout the callgrid library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::CallId;

/// Main error type for callgrid operations
///
/// This enum encompasses all possible errors that can occur while loading
/// and aggregating call logs, from IO errors to per-record validation
/// failures.
#[derive(Error, Debug)]
pub enum CallgridError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// No call log files found
    #[error("No call log files found")]
    NoCallLogs,

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid timezone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A call record whose end does not come after its start
    #[error("call {id}: end {end} is not after start {start}")]
    InvalidInterval {
        /// The offending record
        id: CallId,
        /// Interval start, as written in the log
        start: String,
        /// Interval end, as written in the log
        end: String,
    },

    /// The two time-zone views of one record disagree on duration
    #[error(
        "call {id}: views disagree on duration ({home_minutes:.2} min home vs {away_minutes:.2} min away)"
    )]
    ViewMismatch {
        /// The offending record
        id: CallId,
        /// Duration of the home view in minutes
        home_minutes: f64,
        /// Duration of the away view in minutes
        away_minutes: f64,
    },

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },
}

/// Convenience type alias for Results in callgrid
pub type Result<T> = std::result::Result<T, CallgridError>;
