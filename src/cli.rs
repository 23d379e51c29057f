//! CLI interface for callgrid
//!
//! This module defines the command-line interface using clap. All reports
//! share the global flags (JSON output, date range, log location, zone
//! pair); each subcommand adds its own knobs.
//!
//! # Example
//!
//! ```bash
//! # Hour-of-week heatmap for January 2024
//! callgrid heatmap --since 2024-01-01 --until 2024-01-31
//!
//! # Monthly averages as JSON
//! callgrid trend --interval month --metric average --json
//!
//! # Explicit zones and log location
//! callgrid daily --home-zone Asia/Singapore --away-zone Pacific/Auckland \
//!     --logs ./data/calls.jsonl
//! ```

use crate::aggregation::{TrendInterval, TrendMetric};
use crate::error::{CallgridError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Analyze call-log history between two parties across two time zones
#[derive(Parser, Debug, Clone)]
#[command(name = "callgrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Filter by start date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Filter by end date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub until: Option<String>,

    /// Call log file or directory
    #[arg(long, global = true, env = "CALLGRID_DATA_PATH")]
    pub logs: Option<PathBuf>,

    /// Home party's timezone (e.g. "Asia/Singapore"); defaults to the system timezone
    #[arg(long, global = true)]
    pub home_zone: Option<String>,

    /// Away party's timezone (e.g. "Pacific/Auckland"); defaults to UTC
    #[arg(long, global = true)]
    pub away_zone: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Arguments for the trend report
#[derive(Args, Debug, Clone)]
pub struct TrendArgs {
    /// Grouping interval: day, week, or month
    #[arg(long, default_value = "day")]
    pub interval: TrendInterval,

    /// Metric per interval: total or average
    #[arg(long, default_value = "total")]
    pub metric: TrendMetric,
}

/// Arguments for the duration distribution report
#[derive(Args, Debug, Clone)]
pub struct DistArgs {
    /// Number of histogram bins
    #[arg(long, default_value = "30")]
    pub bins: usize,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the hour-of-week heatmap (weekday × hour grid, both zones)
    Heatmap,
    /// Show call minutes per calendar date
    Daily,
    /// Show monthly call-minute totals
    Monthly,
    /// Show the call-minutes trend over time
    Trend(TrendArgs),
    /// Show the call duration distribution
    Dist(DistArgs),
    /// Show overview statistics
    Summary,
}

/// Parse date filter from string
///
/// Accepts dates in YYYY-MM-DD or YYYY-MM format. For YYYY-MM format,
/// defaults to the first day of the month.
///
/// # Example
///
/// ```
/// use callgrid::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2024-01-15").unwrap();
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2024-01").unwrap();
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    // Try YYYY-MM-DD format first
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    // Try YYYY-MM format (convert to first day of month)
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| CallgridError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| CallgridError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

        if !(1..=12).contains(&month) {
            return Err(CallgridError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        chrono::NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CallgridError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(CallgridError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["callgrid", "--json"]);
        assert!(cli.json);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["callgrid", "heatmap", "--since", "2024-01"]);
        assert!(matches!(cli.command, Some(Command::Heatmap)));
        assert_eq!(cli.since.as_deref(), Some("2024-01"));
    }

    #[test]
    fn test_trend_args() {
        let cli = Cli::parse_from([
            "callgrid", "trend", "--interval", "month", "--metric", "average",
        ]);
        match &cli.command {
            Some(Command::Trend(args)) => {
                assert_eq!(args.interval, TrendInterval::Month);
                assert_eq!(args.metric, TrendMetric::Average);
            }
            _ => panic!("Expected Trend command"),
        }
    }

    #[test]
    fn test_dist_args_default_bins() {
        let cli = Cli::parse_from(["callgrid", "dist"]);
        match &cli.command {
            Some(Command::Dist(args)) => assert_eq!(args.bins, 30),
            _ => panic!("Expected Dist command"),
        }
    }

    #[test]
    fn test_invalid_trend_interval_rejected() {
        let result = Cli::try_parse_from(["callgrid", "trend", "--interval", "fortnight"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_date_parsing() {
        let date = parse_date_filter("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);

        let date = parse_date_filter("2024-01").unwrap();
        assert_eq!(date.day(), 1);

        assert!(parse_date_filter("invalid").is_err());
        assert!(parse_date_filter("2024-13").is_err());
        assert!(parse_date_filter("2024").is_err());
    }
}
