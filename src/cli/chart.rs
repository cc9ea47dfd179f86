//! `chart` subcommand: one period's zero-filled series as text or JSON

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use crate::services::{Aggregator, RangePolicy, RecordStore};
use crate::tui::widgets::chart::{format_sparkline, format_summary};
use crate::types::{format_date, parse_date, DateRange, Result, SeriesPoint, SeriesSummary};

/// Sparkline width per day in text output
const BAR_WIDTH: usize = 30;

/// Print the series for the week, month or year containing a date
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Period to chart: week, month or year
    #[arg(value_name = "PERIOD")]
    pub policy: RangePolicy,

    /// Any date inside the period (dd.mm.yyyy, default today)
    #[arg(long)]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ChartReport {
    policy: RangePolicy,
    title: String,
    range: DateRange,
    points: Vec<SeriesPoint>,
    summary: SeriesSummary,
}

impl ChartArgs {
    pub fn run<S: RecordStore>(self, store: &S, today: NaiveDate) -> Result<String> {
        let anchor = match &self.date {
            Some(date) => parse_date(date)?,
            None => today,
        };
        let range = self.policy.derive(anchor);
        let records = store.fetch_in_range(range)?;
        let series = Aggregator::aggregate(&records, range);
        let summary = Aggregator::summarize(&series);

        let report = ChartReport {
            policy: self.policy,
            title: self.policy.title(range),
            range,
            points: series.points,
            summary,
        };

        if self.json {
            return Ok(serde_json::to_string_pretty(&report)?);
        }
        Ok(format_report(&report))
    }
}

fn format_report(report: &ChartReport) -> String {
    let max = u64::from(report.summary.max);
    let mut lines = vec![report.title.clone(), String::new()];
    lines.extend(report.points.iter().map(|p| {
        format!(
            "{} {}  {} {:>4}",
            format_date(p.date),
            p.date.format("%a"),
            format_sparkline(u64::from(p.value), max, BAR_WIDTH),
            p.value
        )
    }));
    lines.push(String::new());
    lines.push(format_summary(&report.summary));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SqliteStore;
    use crate::types::Record;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.upsert(&Record::new(date(2024, 1, 3), 5, None)).unwrap();
        store.upsert(&Record::new(date(2024, 1, 5), 2, None)).unwrap();
        store
    }

    #[test]
    fn test_week_chart_text() {
        let store = seeded_store();
        let output = ChartArgs {
            policy: RangePolicy::Week,
            date: None,
            json: false,
        }
        .run(&store, date(2024, 1, 3))
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Weekly Chart (01.01.2024 - 07.01.2024)");
        // title, blank, 7 days, blank, summary
        assert_eq!(lines.len(), 11);
        assert!(lines[2].starts_with("01.01.2024 Mon"));
        assert!(lines[4].contains(&"▓".repeat(BAR_WIDTH)));
        assert!(lines[4].ends_with("   5"));
        assert!(lines[10].starts_with("Total 7"));
    }

    #[test]
    fn test_month_chart_json() {
        let store = seeded_store();
        let output = ChartArgs {
            policy: RangePolicy::Month,
            date: Some("15.01.2024".into()),
            json: true,
        }
        .run(&store, date(2030, 6, 1))
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["policy"], "month");
        assert_eq!(value["title"], "Monthly Chart (January 2024)");
        assert_eq!(value["points"].as_array().unwrap().len(), 31);
        assert_eq!(value["points"][2]["value"], 5);
        assert_eq!(value["points"][3]["value"], 0);
        assert_eq!(value["summary"]["total"], 7);
    }

    #[test]
    fn test_chart_rejects_bad_date() {
        let store = seeded_store();
        let err = ChartArgs {
            policy: RangePolicy::Year,
            date: Some("2024-01-03".into()),
            json: false,
        }
        .run(&store, date(2024, 1, 3))
        .unwrap_err();
        assert_eq!(err.to_string(), "Date must use the dd.mm.yyyy format.");
    }

    #[test]
    fn test_chart_rejects_out_of_format_year() {
        let store = seeded_store();
        let err = ChartArgs {
            policy: RangePolicy::Week,
            date: Some("31.12.+262142".into()),
            json: true,
        }
        .run(&store, date(2024, 1, 3))
        .unwrap_err();
        assert!(matches!(err, crate::types::TrackError::Validation(_)));
    }
}
