//! Output formatting module for callgrid
//!
//! This module provides formatters for displaying aggregated call data in
//! different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and external charting layers
//!
//! The heatmap table renders one 7-row × 24-column block per time-zone
//! view; cells with no observed minutes show "-". The JSON heatmap always
//! carries all 168 cells, with `null` marking no data; a cell is never
//! omitted.

use crate::aggregation::{
    DailyMinutes, DurationHistogram, HeatmapGrid, MonthlyMinutes, SummaryStats, Totals,
    TrendInterval, TrendMetric, TrendPoint,
};
use crate::timezone::TimezonePair;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::json;

/// Weekday row labels, index 0 = Sunday per the grid convention
const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the hour-of-week heatmap grid
    fn format_heatmap(&self, grid: &HeatmapGrid, zones: &TimezonePair) -> String;

    /// Format per-date call minutes with totals
    fn format_daily(
        &self,
        data: &[DailyMinutes],
        totals: &Totals,
        zones: &TimezonePair,
    ) -> String;

    /// Format monthly rollups with totals
    fn format_monthly(
        &self,
        data: &[MonthlyMinutes],
        totals: &Totals,
        zones: &TimezonePair,
    ) -> String;

    /// Format trend points
    fn format_trend(
        &self,
        data: &[TrendPoint],
        interval: TrendInterval,
        metric: TrendMetric,
        zones: &TimezonePair,
    ) -> String;

    /// Format the call duration histogram
    fn format_dist(&self, histogram: &DurationHistogram) -> String;

    /// Format overview statistics
    fn format_summary(&self, stats: &SummaryStats) -> String;
}

/// Table formatter for human-readable output
///
/// Produces ASCII tables suitable for terminal display. Minute totals are
/// rounded to whole minutes with thousands separators; no-data cells show
/// a dash.
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new() -> Self {
        Self
    }

    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Format minutes rounded to whole minutes
    fn format_minutes(minutes: f64) -> String {
        Self::format_number(minutes.round() as u64)
    }

    /// Format an optional minutes cell, "-" for no data
    fn format_cell(minutes: Option<f64>) -> String {
        match minutes {
            Some(m) => Self::format_minutes(m),
            None => "-".to_string(),
        }
    }

    /// Render one view's 7x24 block
    fn heatmap_block(minutes_of: impl Fn(u8, u8) -> Option<f64>) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        let mut titles = vec![Cell::new("Day").style_spec("b")];
        for hour in 0..HeatmapGrid::HOURS as u8 {
            titles.push(Cell::new(&format!("{hour:02}")).style_spec("b"));
        }
        table.set_titles(Row::new(titles));

        for weekday in 0..HeatmapGrid::WEEKDAYS as u8 {
            let mut cells = vec![Cell::new(WEEKDAY_LABELS[weekday as usize])];
            for hour in 0..HeatmapGrid::HOURS as u8 {
                let text = Self::format_cell(minutes_of(weekday, hour));
                cells.push(Cell::new(&text).style_spec("r"));
            }
            table.add_row(Row::new(cells));
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_heatmap(&self, grid: &HeatmapGrid, zones: &TimezonePair) -> String {
        let home = Self::heatmap_block(|w, h| grid.cell(w, h).home_minutes);
        let away = Self::heatmap_block(|w, h| grid.cell(w, h).away_minutes);

        format!(
            "Home ({})\n{}\nAway ({})\n{}",
            zones.home_name(),
            home,
            zones.away_name(),
            away
        )
    }

    fn format_daily(
        &self,
        data: &[DailyMinutes],
        totals: &Totals,
        zones: &TimezonePair,
    ) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Date",
            b -> format!("Home min ({})", zones.home_name()),
            b -> format!("Away min ({})", zones.away_name())
        ]);

        for day in data {
            table.add_row(row![
                day.date.format("%Y-%m-%d"),
                r -> Self::format_cell(day.home_minutes),
                r -> Self::format_cell(day.away_minutes)
            ]);
        }

        table.add_row(row![
            b -> "TOTAL",
            b -> Self::format_minutes(totals.home_minutes),
            b -> Self::format_minutes(totals.away_minutes)
        ]);

        table.to_string()
    }

    fn format_monthly(
        &self,
        data: &[MonthlyMinutes],
        totals: &Totals,
        zones: &TimezonePair,
    ) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Month",
            b -> format!("Home min ({})", zones.home_name()),
            b -> format!("Away min ({})", zones.away_name()),
            b -> "Active Days"
        ]);

        for month in data {
            table.add_row(row![
                month.month,
                r -> Self::format_minutes(month.home_minutes),
                r -> Self::format_minutes(month.away_minutes),
                c -> month.active_days
            ]);
        }

        table.add_row(row![
            b -> "TOTAL",
            b -> Self::format_minutes(totals.home_minutes),
            b -> Self::format_minutes(totals.away_minutes),
            ""
        ]);

        table.to_string()
    }

    fn format_trend(
        &self,
        data: &[TrendPoint],
        interval: TrendInterval,
        metric: TrendMetric,
        zones: &TimezonePair,
    ) -> String {
        let interval_label = match interval {
            TrendInterval::Day => "Day",
            TrendInterval::Week => "Week of",
            TrendInterval::Month => "Month",
        };
        let metric_label = match metric {
            TrendMetric::Total => "min",
            TrendMetric::Average => "avg min/day",
        };

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> interval_label,
            b -> format!("Home {} ({})", metric_label, zones.home_name()),
            b -> format!("Away {} ({})", metric_label, zones.away_name())
        ]);

        for point in data {
            table.add_row(row![
                point.label,
                r -> Self::format_cell(point.home_minutes),
                r -> Self::format_cell(point.away_minutes)
            ]);
        }

        table.to_string()
    }

    fn format_dist(&self, histogram: &DurationHistogram) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![b -> "Duration (min)", b -> "Calls"]);

        for bin in &histogram.bins {
            table.add_row(row![
                format!("{:.0}-{:.0}", bin.lower, bin.upper),
                r -> Self::format_number(bin.count as u64)
            ]);
        }

        table.to_string()
    }

    fn format_summary(&self, stats: &SummaryStats) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![b -> "Metric", b -> "Value"]);
        table.add_row(row!["Total Calls", r -> Self::format_number(stats.total_calls as u64)]);
        table.add_row(row!["Total Minutes", r -> Self::format_minutes(stats.total_minutes)]);
        table.add_row(row![
            "Total Hours",
            r -> Self::format_minutes(stats.total_minutes / 60.0)
        ]);
        table.add_row(row![
            "Avg Call Duration (min)",
            r -> format!("{:.1}", stats.avg_minutes)
        ]);
        table.add_row(row![
            "Median Call Duration (min)",
            r -> format!("{:.1}", stats.median_minutes)
        ]);
        table.add_row(row![
            "Max Call Duration (min)",
            r -> Self::format_minutes(stats.max_minutes)
        ]);

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_heatmap(&self, grid: &HeatmapGrid, zones: &TimezonePair) -> String {
        let output = json!({
            "zones": {
                "home": zones.home_name(),
                "away": zones.away_name(),
            },
            "cells": grid.cells(),
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_daily(
        &self,
        data: &[DailyMinutes],
        totals: &Totals,
        zones: &TimezonePair,
    ) -> String {
        let output = json!({
            "zones": {
                "home": zones.home_name(),
                "away": zones.away_name(),
            },
            "daily": data,
            "totals": {
                "home_minutes": totals.home_minutes,
                "away_minutes": totals.away_minutes,
            }
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_monthly(
        &self,
        data: &[MonthlyMinutes],
        totals: &Totals,
        zones: &TimezonePair,
    ) -> String {
        let output = json!({
            "zones": {
                "home": zones.home_name(),
                "away": zones.away_name(),
            },
            "monthly": data,
            "totals": {
                "home_minutes": totals.home_minutes,
                "away_minutes": totals.away_minutes,
            }
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_trend(
        &self,
        data: &[TrendPoint],
        interval: TrendInterval,
        metric: TrendMetric,
        zones: &TimezonePair,
    ) -> String {
        let output = json!({
            "zones": {
                "home": zones.home_name(),
                "away": zones.away_name(),
            },
            "interval": interval.to_string(),
            "metric": metric.to_string(),
            "points": data,
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_dist(&self, histogram: &DurationHistogram) -> String {
        let output = json!({
            "bin_width": histogram.bin_width,
            "bins": histogram.bins,
        });

        serde_json::to_string_pretty(&output).unwrap()
    }

    fn format_summary(&self, stats: &SummaryStats) -> String {
        serde_json::to_string_pretty(stats).unwrap()
    }
}

/// Get appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Tz;
    use futures::stream;

    fn zones() -> TimezonePair {
        TimezonePair {
            home: Tz::Asia__Singapore,
            away: Tz::Pacific__Auckland,
        }
    }

    async fn empty_grid() -> HeatmapGrid {
        use crate::aggregation::Aggregator;
        use crate::error::Result;
        use crate::types::CallRecord;

        Aggregator::new(zones())
            .aggregate_heatmap(stream::iter(Vec::<Result<CallRecord>>::new()))
            .await
            .unwrap()
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(TableFormatter::format_number(1234567), "1,234,567");
        assert_eq!(TableFormatter::format_number(999), "999");
        assert_eq!(TableFormatter::format_number(0), "0");
    }

    #[test]
    fn test_cell_formatting() {
        assert_eq!(TableFormatter::format_cell(Some(1234.4)), "1,234");
        assert_eq!(TableFormatter::format_cell(Some(0.0)), "0");
        assert_eq!(TableFormatter::format_cell(None), "-");
    }

    #[tokio::test]
    async fn test_heatmap_table_shows_both_views() {
        let grid = empty_grid().await;
        let output = TableFormatter::new().format_heatmap(&grid, &zones());

        assert!(output.contains("Asia/Singapore"));
        assert!(output.contains("Pacific/Auckland"));
        assert!(output.contains("Sun"));
        assert!(output.contains("Sat"));
        assert!(output.contains("23"));
    }

    #[tokio::test]
    async fn test_heatmap_json_carries_all_cells() {
        let grid = empty_grid().await;
        let output = JsonFormatter.format_heatmap(&grid, &zones());

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), 168);
        // No-data is null, never omitted.
        assert!(value["cells"][0]["home_minutes"].is_null());
    }

    #[test]
    fn test_daily_table() {
        let data = vec![DailyMinutes {
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            home_minutes: Some(40.0),
            away_minutes: None,
        }];
        let totals = Totals::from_daily(&data);
        let output = TableFormatter::new().format_daily(&data, &totals, &zones());

        assert!(output.contains("2024-01-08"));
        assert!(output.contains("40"));
        assert!(output.contains("-"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_monthly_table() {
        let data = vec![MonthlyMinutes {
            month: "2024-01".to_string(),
            home_minutes: 1234.0,
            away_minutes: 980.0,
            active_days: 12,
        }];
        let totals = Totals::from_monthly(&data);
        let output = TableFormatter::new().format_monthly(&data, &totals, &zones());

        assert!(output.contains("2024-01"));
        assert!(output.contains("1,234"));
        assert!(output.contains("12"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_summary_formats() {
        let stats = SummaryStats::from_durations(&[10.0, 30.0]);

        let table = TableFormatter::new().format_summary(&stats);
        assert!(table.contains("Total Calls"));
        assert!(table.contains("2"));

        let json_output = JsonFormatter.format_summary(&stats);
        let value: serde_json::Value = serde_json::from_str(&json_output).unwrap();
        assert_eq!(value["total_calls"], 2);
    }

    #[test]
    fn test_get_formatter() {
        let stats = SummaryStats::default();
        assert!(
            get_formatter(true)
                .format_summary(&stats)
                .contains("\"total_calls\"")
        );
        assert!(
            get_formatter(false)
                .format_summary(&stats)
                .contains("Total Calls")
        );
    }
}
