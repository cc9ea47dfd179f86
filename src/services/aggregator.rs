//! Aggregator service turning sparse records into chartable series

use crate::types::{DateRange, DenseSeries, Record, SeriesPoint, SeriesSummary};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Aggregator for gap-filling and summarizing record series
pub struct Aggregator;

impl Aggregator {
    /// Produce one point per day of `range` (ascending), taking each day's
    /// record count or 0 when the day has no record.
    ///
    /// Records outside `range` are ignored. If `records` holds more than one
    /// record for a date, the last one in slice order wins.
    pub fn aggregate(records: &[Record], range: DateRange) -> DenseSeries {
        let by_date: HashMap<NaiveDate, u32> = records
            .iter()
            .filter(|r| range.contains(r.date))
            .map(|r| (r.date, r.count))
            .collect();

        let points = range
            .iter_days()
            .map(|date| SeriesPoint {
                date,
                value: by_date.get(&date).copied().unwrap_or(0),
            })
            .collect();

        DenseSeries { range, points }
    }

    /// Totals for a chart footer
    pub fn summarize(series: &DenseSeries) -> SeriesSummary {
        let mut total: u64 = 0;
        let mut max: u32 = 0;
        let mut recorded_days = 0;

        for value in series.values() {
            total = total.saturating_add(u64::from(value));
            max = max.max(value);
            if value > 0 {
                recorded_days += 1;
            }
        }

        let days = series.len();
        let daily_average = if days == 0 {
            0.0
        } else {
            total as f64 / days as f64
        };

        SeriesSummary {
            total,
            max,
            recorded_days,
            days,
            daily_average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RangePolicy;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(y: i32, m: u32, d: u32, count: u32) -> Record {
        Record::new(date(y, m, d), count, None)
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    // ========== aggregate() tests ==========

    #[test]
    fn test_aggregate_empty_records_all_zero() {
        let ranges = [
            range(date(2024, 1, 1), date(2024, 1, 1)),
            range(date(2024, 1, 1), date(2024, 1, 31)),
            range(date(2023, 12, 25), date(2024, 3, 3)),
            RangePolicy::Year.derive(date(2024, 6, 1)),
        ];

        for r in ranges {
            let series = Aggregator::aggregate(&[], r);
            assert_eq!(series.len(), r.days());
            assert!(series.values().all(|v| v == 0));
        }
    }

    #[test]
    fn test_aggregate_week_scenario() {
        let records = vec![record(2024, 1, 3, 5), record(2024, 1, 5, 2)];
        let week = RangePolicy::Week.derive(date(2024, 1, 3));
        assert_eq!(week.start(), date(2024, 1, 1));
        assert_eq!(week.end(), date(2024, 1, 7));

        let series = Aggregator::aggregate(&records, week);
        let values: Vec<u32> = series.values().collect();
        assert_eq!(values, vec![0, 0, 5, 0, 2, 0, 0]);
        assert_eq!(series.points[0].date, date(2024, 1, 1));
        assert_eq!(series.points[6].date, date(2024, 1, 7));
    }

    #[test]
    fn test_aggregate_reproduces_counts_at_record_dates() {
        let records = vec![
            record(2024, 2, 28, 4),
            record(2024, 2, 29, 6),
            record(2024, 3, 2, 1),
        ];
        let r = range(date(2024, 2, 28), date(2024, 3, 2));

        let series = Aggregator::aggregate(&records, r);

        assert_eq!(series.len(), 4);
        for point in &series.points {
            let expected = records
                .iter()
                .find(|rec| rec.date == point.date)
                .map(|rec| rec.count)
                .unwrap_or(0);
            assert_eq!(point.value, expected, "date {}", point.date);
        }
    }

    #[test]
    fn test_aggregate_dates_strictly_consecutive() {
        let records = vec![record(2023, 12, 31, 3), record(2024, 1, 1, 2)];
        let series = Aggregator::aggregate(&records, RangePolicy::Month.derive(date(2023, 12, 15)));

        for pair in series.points.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
        assert_eq!(series.points.first().unwrap().date, date(2023, 12, 1));
        assert_eq!(series.points.last().unwrap().date, date(2023, 12, 31));
    }

    #[test]
    fn test_aggregate_ignores_records_outside_range() {
        let records = vec![
            record(2023, 12, 31, 9),
            record(2024, 1, 2, 3),
            record(2024, 1, 8, 9),
        ];
        let series = Aggregator::aggregate(&records, range(date(2024, 1, 1), date(2024, 1, 7)));

        let values: Vec<u32> = series.values().collect();
        assert_eq!(values, vec![0, 3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_aggregate_duplicate_dates_last_wins() {
        let records = vec![record(2024, 1, 2, 3), record(2024, 1, 2, 8)];
        let series = Aggregator::aggregate(&records, range(date(2024, 1, 1), date(2024, 1, 3)));

        let values: Vec<u32> = series.values().collect();
        assert_eq!(values, vec![0, 8, 0]);
    }

    #[test]
    fn test_aggregate_unsorted_input() {
        let records = vec![record(2024, 1, 7, 1), record(2024, 1, 1, 2), record(2024, 1, 4, 3)];
        let series = Aggregator::aggregate(&records, RangePolicy::Week.derive(date(2024, 1, 4)));

        let values: Vec<u32> = series.values().collect();
        assert_eq!(values, vec![2, 0, 0, 3, 0, 0, 1]);
    }

    #[test]
    fn test_aggregate_keeps_range() {
        let r = range(date(2024, 5, 1), date(2024, 5, 3));
        let series = Aggregator::aggregate(&[], r);
        assert_eq!(series.range, r);
    }

    // ========== summarize() tests ==========

    #[test]
    fn test_summarize_empty_series() {
        let series = Aggregator::aggregate(&[], range(date(2024, 1, 1), date(2024, 1, 10)));
        let summary = Aggregator::summarize(&series);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.max, 0);
        assert_eq!(summary.recorded_days, 0);
        assert_eq!(summary.days, 10);
        assert!((summary.daily_average - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_week() {
        let records = vec![record(2024, 1, 3, 5), record(2024, 1, 5, 2)];
        let series = Aggregator::aggregate(&records, RangePolicy::Week.derive(date(2024, 1, 3)));
        let summary = Aggregator::summarize(&series);

        assert_eq!(summary.total, 7);
        assert_eq!(summary.max, 5);
        assert_eq!(summary.recorded_days, 2);
        assert_eq!(summary.days, 7);
        assert!((summary.daily_average - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_zero_count_record_not_counted_as_recorded() {
        let records = vec![record(2024, 1, 1, 0), record(2024, 1, 2, 4)];
        let series = Aggregator::aggregate(&records, range(date(2024, 1, 1), date(2024, 1, 2)));

        assert_eq!(Aggregator::summarize(&series).recorded_days, 1);
    }
}
