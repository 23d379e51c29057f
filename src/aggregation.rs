//! Aggregation module for summarizing call history
//!
//! This module turns streams of call records into the report shapes the
//! output layer renders: the hour-of-week heatmap grid, per-date calendar
//! totals, monthly and trend rollups, summary statistics, and the call
//! duration histogram.
//!
//! The heatmap pipeline is the heart of the crate: every record is split
//! across wall-clock hour boundaries (once per time-zone view), the
//! resulting slices are summed per (weekday, hour-of-day) cell, and the
//! sums are joined onto the complete 7×24 key set so the output grid always
//! has exactly 168 cells. Cells with no observed slices carry `None`, which
//! is distinct from an observed zero-minute total.

use crate::error::Result;
use crate::splitter::split_by_hour;
use crate::timezone::TimezonePair;
use crate::types::CallRecord;
use chrono::{Datelike, Duration, NaiveDate, Timelike};
use futures::stream::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One cell of the hour-of-week grid
///
/// `None` marks a cell with no observed call minutes in the filtered
/// window; a real zero-minute observation would be `Some(0.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Weekday, 0 = Sunday through 6 = Saturday
    pub weekday: u8,
    /// Hour of day, 0 through 23
    pub hour: u8,
    /// Summed minutes in the home view
    pub home_minutes: Option<f64>,
    /// Summed minutes in the away view
    pub away_minutes: Option<f64>,
}

/// Dense 7×24 hour-of-week grid, 168 cells, ordered by (weekday, hour)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    cells: Vec<HeatmapCell>,
}

impl HeatmapGrid {
    /// Number of weekday rows
    pub const WEEKDAYS: usize = 7;
    /// Number of hour columns
    pub const HOURS: usize = 24;

    /// Join per-view sums onto the canonical 7×24 key set.
    ///
    /// The key set is enumerated explicitly so the output order never
    /// depends on map iteration: weekday-major, hour-minor, all 168 keys.
    fn from_view_sums(home: &BTreeMap<(u8, u8), f64>, away: &BTreeMap<(u8, u8), f64>) -> Self {
        let mut cells = Vec::with_capacity(Self::WEEKDAYS * Self::HOURS);
        for weekday in 0..Self::WEEKDAYS as u8 {
            for hour in 0..Self::HOURS as u8 {
                cells.push(HeatmapCell {
                    weekday,
                    hour,
                    home_minutes: home.get(&(weekday, hour)).copied(),
                    away_minutes: away.get(&(weekday, hour)).copied(),
                });
            }
        }
        Self { cells }
    }

    /// All 168 cells, (weekday, hour) ascending
    pub fn cells(&self) -> &[HeatmapCell] {
        &self.cells
    }

    /// Look up one cell; `weekday` must be 0..=6 and `hour` 0..=23
    pub fn cell(&self, weekday: u8, hour: u8) -> &HeatmapCell {
        &self.cells[weekday as usize * Self::HOURS + hour as usize]
    }
}

/// Per-date minutes for the calendar view
///
/// A call crossing local midnight contributes to both dates, split exactly
/// at the boundary. Each view keys by its own local date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMinutes {
    /// Local calendar date
    pub date: NaiveDate,
    /// Minutes observed in the home view on this date
    pub home_minutes: Option<f64>,
    /// Minutes observed in the away view on this date
    pub away_minutes: Option<f64>,
}

/// Monthly rollup of the calendar view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMinutes {
    /// Year and month in YYYY-MM format
    pub month: String,
    /// Total home-view minutes for the month
    pub home_minutes: f64,
    /// Total away-view minutes for the month
    pub away_minutes: f64,
    /// Number of days with call activity in this month
    pub active_days: usize,
}

/// Grouping interval for the trend report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendInterval {
    /// One point per day
    Day,
    /// One point per week, weeks starting Sunday
    Week,
    /// One point per calendar month
    Month,
}

impl fmt::Display for TrendInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for TrendInterval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!("Invalid trend interval: {s}")),
        }
    }
}

/// Metric plotted by the trend report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendMetric {
    /// Sum of minutes per interval
    Total,
    /// Average minutes per day with data within the interval
    Average,
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Total => write!(f, "total"),
            Self::Average => write!(f, "average"),
        }
    }
}

impl std::str::FromStr for TrendMetric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "total" => Ok(Self::Total),
            "average" => Ok(Self::Average),
            _ => Err(format!("Invalid trend metric: {s}")),
        }
    }
}

/// One point of the trend report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// First day of the interval
    pub period: NaiveDate,
    /// Human-readable interval label
    pub label: String,
    /// Metric value for the home view
    pub home_minutes: Option<f64>,
    /// Metric value for the away view
    pub away_minutes: Option<f64>,
}

/// Overview statistics across the filtered call set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of calls
    pub total_calls: usize,
    /// Sum of call durations in minutes
    pub total_minutes: f64,
    /// Mean call duration in minutes
    pub avg_minutes: f64,
    /// Median call duration in minutes
    pub median_minutes: f64,
    /// Longest call in minutes
    pub max_minutes: f64,
}

impl SummaryStats {
    /// Compute stats from a set of call durations (minutes)
    pub fn from_durations(durations: &[f64]) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        let total_minutes: f64 = durations.iter().sum();
        let max_minutes = durations.iter().copied().fold(0.0, f64::max);

        let mut sorted = durations.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("durations are finite"));
        let mid = sorted.len() / 2;
        let median_minutes = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            total_calls: durations.len(),
            total_minutes,
            avg_minutes: total_minutes / durations.len() as f64,
            median_minutes,
            max_minutes,
        }
    }
}

/// One bin of the duration histogram, lower-inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Lower bound in minutes, inclusive
    pub lower: f64,
    /// Upper bound in minutes, exclusive (the last bin is inclusive)
    pub upper: f64,
    /// Number of calls in this bin
    pub count: usize,
}

/// Fixed-width histogram of call durations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationHistogram {
    /// Width of each bin in minutes
    pub bin_width: f64,
    /// The bins, ascending; empty bins between populated ones are kept
    /// so the range up to the longest call is contiguous
    pub bins: Vec<HistogramBin>,
}

impl DurationHistogram {
    /// Bin call durations into at most `bin_count` fixed-width bins.
    ///
    /// The bin width is the smallest whole number of minutes that covers
    /// the longest call in `bin_count` bins. Empty input yields no bins.
    pub fn from_durations(durations: &[f64], bin_count: usize) -> Self {
        let max = durations.iter().copied().fold(0.0, f64::max);
        if durations.is_empty() || bin_count == 0 || max <= 0.0 {
            return Self {
                bin_width: 0.0,
                bins: Vec::new(),
            };
        }

        let bin_width = (max / bin_count as f64).ceil().max(1.0);
        let bins_needed = (max / bin_width).ceil() as usize;

        let mut bins: Vec<HistogramBin> = (0..bins_needed)
            .map(|i| HistogramBin {
                lower: i as f64 * bin_width,
                upper: (i + 1) as f64 * bin_width,
                count: 0,
            })
            .collect();

        for &duration in durations {
            let index = ((duration / bin_width) as usize).min(bins_needed - 1);
            bins[index].count += 1;
        }

        Self { bin_width, bins }
    }
}

/// Totals row for the calendar table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Total home-view minutes
    pub home_minutes: f64,
    /// Total away-view minutes
    pub away_minutes: f64,
}

impl Totals {
    /// Sum the observed minutes across daily rows
    pub fn from_daily(daily: &[DailyMinutes]) -> Self {
        let mut totals = Self::default();
        for day in daily {
            totals.home_minutes += day.home_minutes.unwrap_or(0.0);
            totals.away_minutes += day.away_minutes.unwrap_or(0.0);
        }
        totals
    }

    /// Sum the minutes across monthly rows
    pub fn from_monthly(monthly: &[MonthlyMinutes]) -> Self {
        let mut totals = Self::default();
        for month in monthly {
            totals.home_minutes += month.home_minutes;
            totals.away_minutes += month.away_minutes;
        }
        totals
    }
}

/// Accumulator for one calendar date
#[derive(Default)]
struct DayAccumulator {
    home: Option<f64>,
    away: Option<f64>,
}

fn add_minutes(slot: &mut Option<f64>, minutes: f64) {
    *slot = Some(slot.unwrap_or(0.0) + minutes);
}

/// Grid coordinates of an hour bucket: (weekday 0=Sunday, hour-of-day)
fn grid_key(bucket: chrono::NaiveDateTime) -> (u8, u8) {
    (
        bucket.weekday().num_days_from_sunday() as u8,
        bucket.hour() as u8,
    )
}

/// Main aggregation engine
pub struct Aggregator {
    zones: TimezonePair,
    show_progress: bool,
}

impl Aggregator {
    /// Create a new Aggregator for the given zone pair
    pub fn new(zones: TimezonePair) -> Self {
        Self {
            zones,
            show_progress: false,
        }
    }

    /// Enable or disable progress spinners
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Get the configured zone pair
    pub fn zones(&self) -> &TimezonePair {
        &self.zones
    }

    fn progress_spinner(&self, message: &'static str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} calls processed")
                .unwrap(),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    }

    /// Build the dense hour-of-week heatmap grid.
    ///
    /// Every record is split across hour boundaries once per view; slice
    /// minutes are summed per (weekday, hour) in ordered maps and joined
    /// onto the full 168-key set. Empty input yields a grid of 168
    /// no-data cells.
    pub async fn aggregate_heatmap(
        &self,
        records: impl Stream<Item = Result<CallRecord>>,
    ) -> Result<HeatmapGrid> {
        let mut home_sums: BTreeMap<(u8, u8), f64> = BTreeMap::new();
        let mut away_sums: BTreeMap<(u8, u8), f64> = BTreeMap::new();

        let progress = self.progress_spinner("Aggregating hour-of-week heatmap");
        let mut count = 0u64;

        tokio::pin!(records);
        while let Some(result) = records.next().await {
            let record = result?;

            for slice in split_by_hour(record.home.start, record.home.end) {
                *home_sums.entry(grid_key(slice.bucket)).or_insert(0.0) += slice.minutes;
            }
            for slice in split_by_hour(record.away.start, record.away.end) {
                *away_sums.entry(grid_key(slice.bucket)).or_insert(0.0) += slice.minutes;
            }

            count += 1;
            if let Some(ref pb) = progress {
                pb.set_position(count);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Aggregated {count} calls"));
        }

        Ok(HeatmapGrid::from_view_sums(&home_sums, &away_sums))
    }

    /// Aggregate minutes per local calendar date, per view.
    ///
    /// Dates are attributed through the splitter, so a call crossing local
    /// midnight lands on both dates with an exact split. The result is the
    /// outer join of the two views on date, ascending.
    pub async fn aggregate_daily(
        &self,
        records: impl Stream<Item = Result<CallRecord>>,
    ) -> Result<Vec<DailyMinutes>> {
        let mut daily_map: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

        let progress = self.progress_spinner("Aggregating daily call minutes");
        let mut count = 0u64;

        tokio::pin!(records);
        while let Some(result) = records.next().await {
            let record = result?;

            for slice in split_by_hour(record.home.start, record.home.end) {
                let acc = daily_map.entry(slice.bucket.date()).or_default();
                add_minutes(&mut acc.home, slice.minutes);
            }
            for slice in split_by_hour(record.away.start, record.away.end) {
                let acc = daily_map.entry(slice.bucket.date()).or_default();
                add_minutes(&mut acc.away, slice.minutes);
            }

            count += 1;
            if let Some(ref pb) = progress {
                pb.set_position(count);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!(
                "Aggregated {} calls into {} days",
                count,
                daily_map.len()
            ));
        }

        Ok(daily_map
            .into_iter()
            .map(|(date, acc)| DailyMinutes {
                date,
                home_minutes: acc.home,
                away_minutes: acc.away,
            })
            .collect())
    }

    /// Collect call durations (minutes) for the summary and histogram
    pub async fn collect_durations(
        &self,
        records: impl Stream<Item = Result<CallRecord>>,
    ) -> Result<Vec<f64>> {
        let mut durations = Vec::new();

        tokio::pin!(records);
        while let Some(result) = records.next().await {
            let record = result?;
            durations.push(record.duration_minutes());
        }

        Ok(durations)
    }

    /// Roll daily minutes up into monthly summaries
    pub fn aggregate_monthly(daily: &[DailyMinutes]) -> Vec<MonthlyMinutes> {
        let mut monthly_map: BTreeMap<String, (f64, f64, usize)> = BTreeMap::new();

        for day in daily {
            let month = day.date.format("%Y-%m").to_string();
            let entry = monthly_map.entry(month).or_insert((0.0, 0.0, 0));

            entry.0 += day.home_minutes.unwrap_or(0.0);
            entry.1 += day.away_minutes.unwrap_or(0.0);
            entry.2 += 1;
        }

        monthly_map
            .into_iter()
            .map(|(month, (home, away, days))| MonthlyMinutes {
                month,
                home_minutes: home,
                away_minutes: away,
                active_days: days,
            })
            .collect()
    }

    /// Group daily minutes into trend points.
    ///
    /// Weeks start on Sunday, matching the grid's weekday convention. The
    /// average metric divides by days with data in the interval, not by
    /// calendar length, so quiet days do not dilute it.
    pub fn build_trend(
        daily: &[DailyMinutes],
        interval: TrendInterval,
        metric: TrendMetric,
    ) -> Vec<TrendPoint> {
        let mut buckets: BTreeMap<NaiveDate, (f64, usize, f64, usize)> = BTreeMap::new();

        for day in daily {
            let period = match interval {
                TrendInterval::Day => day.date,
                TrendInterval::Week => {
                    day.date - Duration::days(day.date.weekday().num_days_from_sunday() as i64)
                }
                TrendInterval::Month => day
                    .date
                    .with_day(1)
                    .expect("the first of the month is always a valid date"),
            };

            let entry = buckets.entry(period).or_insert((0.0, 0, 0.0, 0));
            if let Some(minutes) = day.home_minutes {
                entry.0 += minutes;
                entry.1 += 1;
            }
            if let Some(minutes) = day.away_minutes {
                entry.2 += minutes;
                entry.3 += 1;
            }
        }

        buckets
            .into_iter()
            .map(|(period, (home_sum, home_days, away_sum, away_days))| {
                let value = |sum: f64, days: usize| -> Option<f64> {
                    if days == 0 {
                        return None;
                    }
                    match metric {
                        TrendMetric::Total => Some(sum),
                        TrendMetric::Average => Some(sum / days as f64),
                    }
                };
                let label = match interval {
                    TrendInterval::Day | TrendInterval::Week => {
                        period.format("%Y-%m-%d").to_string()
                    }
                    TrendInterval::Month => period.format("%b %Y").to_string(),
                };
                TrendPoint {
                    period,
                    label,
                    home_minutes: value(home_sum, home_days),
                    away_minutes: value(away_sum, away_days),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CallId, LocalInterval};
    use chrono::NaiveDateTime;
    use futures::stream;

    fn dt(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    /// A record whose two views happen to coincide; fine for grid tests
    /// that only exercise one view's arithmetic.
    fn record(id: &str, start: &str, end: &str) -> CallRecord {
        CallRecord {
            id: CallId::new(id),
            home: LocalInterval::new(dt(start), dt(end)),
            away: LocalInterval::new(dt(start), dt(end)),
        }
    }

    fn aggregator() -> Aggregator {
        Aggregator::new(TimezonePair::default())
    }

    #[tokio::test]
    async fn test_empty_input_yields_full_grid() {
        let grid = aggregator()
            .aggregate_heatmap(stream::iter(Vec::<Result<CallRecord>>::new()))
            .await
            .unwrap();

        assert_eq!(grid.cells().len(), 168);
        for cell in grid.cells() {
            assert_eq!(cell.home_minutes, None);
            assert_eq!(cell.away_minutes, None);
        }
    }

    #[tokio::test]
    async fn test_monday_scenario() {
        // 2024-01-08 is a Monday (weekday 1). Two calls: 09:15-09:45 all
        // within hour 9, 09:50-10:10 split 10/10 across hours 9 and 10.
        let records = vec![
            Ok(record("c1", "2024-01-08T09:15:00", "2024-01-08T09:45:00")),
            Ok(record("c2", "2024-01-08T09:50:00", "2024-01-08T10:10:00")),
        ];

        let grid = aggregator()
            .aggregate_heatmap(stream::iter(records))
            .await
            .unwrap();

        assert_eq!(grid.cell(1, 9).home_minutes, Some(40.0));
        assert_eq!(grid.cell(1, 10).home_minutes, Some(10.0));

        let populated = grid
            .cells()
            .iter()
            .filter(|c| c.home_minutes.is_some())
            .count();
        assert_eq!(populated, 2);
    }

    #[tokio::test]
    async fn test_weekday_convention() {
        // 2024-01-07 is a Sunday, 2024-01-06 a Saturday.
        let records = vec![
            Ok(record("sun", "2024-01-07T08:00:00", "2024-01-07T08:30:00")),
            Ok(record("sat", "2024-01-06T22:00:00", "2024-01-06T22:30:00")),
        ];

        let grid = aggregator()
            .aggregate_heatmap(stream::iter(records))
            .await
            .unwrap();

        assert_eq!(grid.cell(0, 8).home_minutes, Some(30.0));
        assert_eq!(grid.cell(6, 22).home_minutes, Some(30.0));
    }

    #[tokio::test]
    async fn test_views_aggregate_independently() {
        let records = vec![Ok(CallRecord {
            id: CallId::new("c1"),
            home: LocalInterval::new(dt("2024-01-08T21:00:00"), dt("2024-01-08T21:30:00")),
            away: LocalInterval::new(dt("2024-01-09T02:00:00"), dt("2024-01-09T02:30:00")),
        })];

        let grid = aggregator()
            .aggregate_heatmap(stream::iter(records))
            .await
            .unwrap();

        // Monday 21h for home, Tuesday 2h for away.
        let home_cell = grid.cell(1, 21);
        assert_eq!(home_cell.home_minutes, Some(30.0));
        assert_eq!(home_cell.away_minutes, None);

        let away_cell = grid.cell(2, 2);
        assert_eq!(away_cell.home_minutes, None);
        assert_eq!(away_cell.away_minutes, Some(30.0));
    }

    #[tokio::test]
    async fn test_daily_splits_at_midnight() {
        let records = vec![Ok(record(
            "late",
            "2024-01-08T23:30:00",
            "2024-01-09T00:30:00",
        ))];

        let daily = aggregator()
            .aggregate_daily(stream::iter(records))
            .await
            .unwrap();

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(daily[0].home_minutes, Some(30.0));
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
        assert_eq!(daily[1].home_minutes, Some(30.0));
    }

    #[test]
    fn test_monthly_rollup() {
        let daily = vec![
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                home_minutes: Some(40.0),
                away_minutes: Some(40.0),
            },
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                home_minutes: Some(20.0),
                away_minutes: None,
            },
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                home_minutes: Some(10.0),
                away_minutes: Some(10.0),
            },
        ];

        let monthly = Aggregator::aggregate_monthly(&daily);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].month, "2024-01");
        assert_eq!(monthly[0].home_minutes, 60.0);
        assert_eq!(monthly[0].active_days, 2);
        assert_eq!(monthly[1].month, "2024-02");
        assert_eq!(monthly[1].home_minutes, 10.0);
    }

    #[test]
    fn test_trend_weekly_average() {
        // Both dates fall in the week starting Sunday 2024-01-07.
        let daily = vec![
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                home_minutes: Some(30.0),
                away_minutes: None,
            },
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                home_minutes: Some(60.0),
                away_minutes: Some(10.0),
            },
        ];

        let trend = Aggregator::build_trend(&daily, TrendInterval::Week, TrendMetric::Average);
        assert_eq!(trend.len(), 1);
        assert_eq!(
            trend[0].period,
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
        );
        assert_eq!(trend[0].home_minutes, Some(45.0));
        // Away has data on one day only; the average ignores the other.
        assert_eq!(trend[0].away_minutes, Some(10.0));
    }

    #[test]
    fn test_trend_monthly_total() {
        let daily = vec![
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                home_minutes: Some(30.0),
                away_minutes: Some(5.0),
            },
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                home_minutes: Some(15.0),
                away_minutes: None,
            },
        ];

        let trend = Aggregator::build_trend(&daily, TrendInterval::Month, TrendMetric::Total);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].label, "Jan 2024");
        assert_eq!(trend[0].home_minutes, Some(45.0));
        assert_eq!(trend[0].away_minutes, Some(5.0));
    }

    #[test]
    fn test_summary_stats() {
        let stats = SummaryStats::from_durations(&[10.0, 20.0, 30.0, 100.0]);
        assert_eq!(stats.total_calls, 4);
        assert_eq!(stats.total_minutes, 160.0);
        assert_eq!(stats.avg_minutes, 40.0);
        assert_eq!(stats.median_minutes, 25.0);
        assert_eq!(stats.max_minutes, 100.0);

        let odd = SummaryStats::from_durations(&[10.0, 20.0, 30.0]);
        assert_eq!(odd.median_minutes, 20.0);

        let empty = SummaryStats::from_durations(&[]);
        assert_eq!(empty.total_calls, 0);
        assert_eq!(empty.total_minutes, 0.0);
    }

    #[test]
    fn test_duration_histogram() {
        let histogram = DurationHistogram::from_durations(&[5.0, 12.0, 17.0, 58.0], 6);
        assert_eq!(histogram.bin_width, 10.0);
        assert_eq!(histogram.bins.len(), 6);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[1].count, 2);
        assert_eq!(histogram.bins[5].count, 1);

        // The longest duration lands in the last bin, not past it.
        let edge = DurationHistogram::from_durations(&[60.0], 6);
        assert_eq!(edge.bins.last().unwrap().count, 1);

        let empty = DurationHistogram::from_durations(&[], 30);
        assert!(empty.bins.is_empty());
    }

    #[test]
    fn test_totals_from_daily() {
        let daily = vec![
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                home_minutes: Some(40.0),
                away_minutes: None,
            },
            DailyMinutes {
                date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                home_minutes: Some(10.0),
                away_minutes: Some(50.0),
            },
        ];

        let totals = Totals::from_daily(&daily);
        assert_eq!(totals.home_minutes, 50.0);
        assert_eq!(totals.away_minutes, 50.0);
    }
}
