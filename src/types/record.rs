//! Record, date range and dense series types

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Result, TrackError, DATE_FORMAT};

/// One day's entry. `date` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub count: u32,
    pub note: Option<String>,
}

impl Record {
    pub fn new(date: NaiveDate, count: u32, note: Option<String>) -> Self {
        Self {
            date,
            count,
            note: normalize_note(note),
        }
    }

    /// Note text for display, empty when absent
    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

/// Inclusive date range, always `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(TrackError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Single-day range
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Range of `days` days beginning at `start` (at least one day)
    /// Clamped at the last representable date.
    pub fn from_start(start: NaiveDate, days: u64) -> Self {
        Self {
            start,
            end: start
                .checked_add_days(Days::new(days.saturating_sub(1)))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day from start to end, ascending
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: u32,
}

/// Zero-filled series with exactly one point per day of `range`.
/// Recomputed on every refresh, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenseSeries {
    pub range: DateRange,
    pub points: Vec<SeriesPoint>,
}

impl DenseSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// Totals shown under a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub total: u64,
    pub max: u32,
    /// Days with a non-zero value
    pub recorded_days: usize,
    pub days: usize,
    pub daily_average: f64,
}

/// Format a date the way it is stored and displayed (dd.mm.yyyy)
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse user or stored date text in dd.mm.yyyy form. The year is
/// exactly four unsigned digits, so every accepted date formats back to
/// the same ten characters.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || TrackError::Validation("Date must use the dd.mm.yyyy format.".into());
    let input = input.trim();
    if !has_date_shape(input) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// `dd.mm.yyyy` with ASCII digits only
fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        })
}

/// Whether `date` fits the four-digit year of the stored text format
pub fn is_storable(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Validate a count entered by the user: digits only, no sign
pub fn parse_count(input: &str) -> Result<u32> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TrackError::Validation("Egg count must be a number.".into()));
    }
    input
        .parse::<u32>()
        .map_err(|_| TrackError::Validation("Egg count is too large.".into()))
}

/// Blank notes are stored as absent
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
