//! Timezone pair configuration
//!
//! This module configures the two named zones the call log spans: the home
//! party's zone and the away party's zone. It also provides detection of
//! the system's local timezone used as the default home zone.

use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CallgridError, Result};

/// The two time zones a call log spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezonePair {
    /// The home party's zone
    pub home: Tz,
    /// The away party's zone
    pub away: Tz,
}

impl Default for TimezonePair {
    fn default() -> Self {
        Self {
            home: local_timezone(),
            away: Tz::UTC,
        }
    }
}

impl TimezonePair {
    /// Create a zone pair from CLI arguments.
    ///
    /// The home zone defaults to the system's local timezone, the away zone
    /// to UTC.
    pub fn from_cli(home: Option<&str>, away: Option<&str>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            home: match home {
                Some(s) => parse_zone(s)?,
                None => defaults.home,
            },
            away: match away {
                Some(s) => parse_zone(s)?,
                None => defaults.away,
            },
        })
    }

    /// Display name of the home zone
    pub fn home_name(&self) -> &str {
        self.home.name()
    }

    /// Display name of the away zone
    pub fn away_name(&self) -> &str {
        self.away.name()
    }
}

/// Parse an IANA zone name
fn parse_zone(s: &str) -> Result<Tz> {
    Tz::from_str(s).map_err(|_| {
        CallgridError::InvalidTimezone(format!(
            "'{s}'. Use format like 'America/New_York', 'Asia/Singapore', or 'UTC'"
        ))
    })
}

/// Detect the system's local timezone
///
/// Checks the TZ environment variable first, then asks the platform via
/// `iana-time-zone`. Falls back to UTC when detection fails.
pub fn local_timezone() -> Tz {
    if let Ok(tz_str) = std::env::var("TZ")
        && let Ok(tz) = Tz::from_str(&tz_str)
    {
        debug!("Using timezone from TZ environment variable: {}", tz_str);
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone from iana-time-zone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!(
                    "Could not parse timezone from iana-time-zone: '{}', falling back to UTC",
                    tz_str
                );
                Tz::UTC
            }
        },
        Err(e) => {
            debug!(
                "Could not detect local timezone via iana-time-zone: {:?}, falling back to UTC",
                e
            );
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_pair() {
        let pair =
            TimezonePair::from_cli(Some("Asia/Singapore"), Some("Pacific/Auckland")).unwrap();
        assert_eq!(pair.home_name(), "Asia/Singapore");
        assert_eq!(pair.away_name(), "Pacific/Auckland");
    }

    #[test]
    fn test_away_defaults_to_utc() {
        let pair = TimezonePair::from_cli(Some("Asia/Singapore"), None).unwrap();
        assert_eq!(pair.away, Tz::UTC);
    }

    #[test]
    fn test_invalid_zone() {
        let result = TimezonePair::from_cli(Some("Invalid/Zone"), None);
        assert!(matches!(result, Err(CallgridError::InvalidTimezone(_))));
    }
}
