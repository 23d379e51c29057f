//! Core domain types for callgrid
//!
//! This module contains the fundamental types used throughout the callgrid
//! library: call identifiers, per-view wall-clock intervals, and the call
//! record that carries both time-zone views of one real-world call.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CallgridError, Result};
use crate::timezone::TimezonePair;

/// Maximum tolerated disagreement between the two views of one record,
/// in minutes (one second).
const VIEW_TOLERANCE_MINUTES: f64 = 1.0 / 60.0;

/// Strongly-typed call identifier
///
/// # Examples
/// ```
/// use callgrid::types::CallId;
///
/// let id = CallId::new("call-001");
/// assert_eq!(id.as_str(), "call-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallId(String);

impl CallId {
    /// Create a new CallId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CallId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One time-zone view of a call: a wall-clock interval in that zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalInterval {
    /// Wall-clock start in the view's zone
    pub start: NaiveDateTime,
    /// Wall-clock end in the view's zone
    pub end: NaiveDateTime,
}

impl LocalInterval {
    /// Create a new LocalInterval
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Duration of this view in minutes, possibly fractional
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }
}

/// One historical call, carried in both parties' local time
///
/// The two views are independent projections of the same real-world
/// interval: numerically different clock times, identical duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Call identifier
    pub id: CallId,
    /// The home party's local view
    pub home: LocalInterval,
    /// The away party's local view
    pub away: LocalInterval,
}

impl CallRecord {
    /// Duration of the call in minutes (both views agree once validated)
    pub fn duration_minutes(&self) -> f64 {
        self.home.duration_minutes()
    }

    /// Check the record's integrity: each view must end after it starts,
    /// and the two views must agree on duration.
    ///
    /// # Errors
    ///
    /// Returns [`CallgridError::InvalidInterval`] naming this record when a
    /// view's end is not after its start, and [`CallgridError::ViewMismatch`]
    /// when the views disagree on duration by more than one second.
    pub fn validate(&self) -> Result<()> {
        for view in [&self.home, &self.away] {
            if view.end <= view.start {
                return Err(CallgridError::InvalidInterval {
                    id: self.id.clone(),
                    start: view.start.to_string(),
                    end: view.end.to_string(),
                });
            }
        }

        let home_minutes = self.home.duration_minutes();
        let away_minutes = self.away.duration_minutes();
        if (home_minutes - away_minutes).abs() > VIEW_TOLERANCE_MINUTES {
            return Err(CallgridError::ViewMismatch {
                id: self.id.clone(),
                home_minutes,
                away_minutes,
            });
        }

        Ok(())
    }
}

/// A call record as written in the log, before normalization
///
/// Two wire shapes are accepted: records that spell out both local views,
/// and records that carry a single UTC interval from which both views are
/// projected via the configured zone pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCall {
    /// Explicit four-timestamp shape: both views as naive local datetimes
    Localized {
        /// Call identifier
        call_id: CallId,
        /// Home-view wall-clock start
        home_start: NaiveDateTime,
        /// Home-view wall-clock end
        home_end: NaiveDateTime,
        /// Away-view wall-clock start
        away_start: NaiveDateTime,
        /// Away-view wall-clock end
        away_end: NaiveDateTime,
    },
    /// Single UTC interval; views are derived from the zone pair
    Utc {
        /// Call identifier
        call_id: CallId,
        /// Start instant
        start: DateTime<Utc>,
        /// End instant
        end: DateTime<Utc>,
    },
}

impl RawCall {
    /// Normalize into a validated [`CallRecord`].
    ///
    /// Localized records are validated for per-view ordering and cross-view
    /// duration agreement. UTC records are validated for ordering and then
    /// projected into the home and away zones; their views cannot be
    /// mispaired by construction.
    pub fn into_record(self, zones: &TimezonePair) -> Result<CallRecord> {
        match self {
            RawCall::Localized {
                call_id,
                home_start,
                home_end,
                away_start,
                away_end,
            } => {
                let record = CallRecord {
                    id: call_id,
                    home: LocalInterval::new(home_start, home_end),
                    away: LocalInterval::new(away_start, away_end),
                };
                record.validate()?;
                Ok(record)
            }
            RawCall::Utc {
                call_id,
                start,
                end,
            } => {
                if end <= start {
                    return Err(CallgridError::InvalidInterval {
                        id: call_id,
                        start: start.to_rfc3339(),
                        end: end.to_rfc3339(),
                    });
                }
                Ok(CallRecord {
                    id: call_id,
                    home: LocalInterval::new(
                        start.with_timezone(&zones.home).naive_local(),
                        end.with_timezone(&zones.home).naive_local(),
                    ),
                    away: LocalInterval::new(
                        start.with_timezone(&zones.away).naive_local(),
                        end.with_timezone(&zones.away).naive_local(),
                    ),
                })
            }
        }
    }
}
