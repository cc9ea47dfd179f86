//! Range policies deriving the week, month or year around an anchor date

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::types::{format_date, DateRange};

/// Chart period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Monday through Sunday
    #[default]
    Week,
    Month,
    Year,
}

impl RangePolicy {
    pub fn all() -> &'static [RangePolicy] {
        &[RangePolicy::Week, RangePolicy::Month, RangePolicy::Year]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Weekly",
            Self::Month => "Monthly",
            Self::Year => "Yearly",
        }
    }

    /// The inclusive range of this period containing `anchor`
    pub fn derive(self, anchor: NaiveDate) -> DateRange {
        match self {
            Self::Week => {
                let offset = anchor.weekday().num_days_from_monday();
                DateRange::from_start(back(anchor, offset), 7)
            }
            Self::Month => {
                let days = days_in_month(anchor.year(), anchor.month());
                DateRange::from_start(back(anchor, anchor.day0()), days)
            }
            Self::Year => {
                let days = if is_leap_year(anchor.year()) { 366 } else { 365 };
                DateRange::from_start(back(anchor, anchor.ordinal0()), days)
            }
        }
    }

    /// Move `anchor` by whole periods. Month and year steps clamp the day
    /// to the target month's length (31.01 + 1 month = 29.02 in leap years).
    pub fn shift(self, anchor: NaiveDate, steps: i32) -> NaiveDate {
        let magnitude = steps.unsigned_abs();
        let shifted = match self {
            Self::Week => {
                let days = Days::new(u64::from(magnitude) * 7);
                if steps >= 0 {
                    anchor.checked_add_days(days)
                } else {
                    anchor.checked_sub_days(days)
                }
            }
            Self::Month | Self::Year => {
                let months = if self == Self::Year {
                    Months::new(magnitude.saturating_mul(12))
                } else {
                    Months::new(magnitude)
                };
                if steps >= 0 {
                    anchor.checked_add_months(months)
                } else {
                    anchor.checked_sub_months(months)
                }
            }
        };
        shifted.unwrap_or(anchor)
    }

    /// Chart heading for a derived range
    pub fn title(self, range: DateRange) -> String {
        match self {
            Self::Week => format!(
                "Weekly Chart ({} - {})",
                format_date(range.start()),
                format_date(range.end())
            ),
            Self::Month => format!("Monthly Chart ({})", range.start().format("%B %Y")),
            Self::Year => format!("Yearly Chart ({})", range.start().year()),
        }
    }
}

impl std::str::FromStr for RangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" | "weekly" | "w" => Ok(Self::Week),
            "month" | "monthly" | "m" => Ok(Self::Month),
            "year" | "yearly" | "y" => Ok(Self::Year),
            other => Err(format!("unknown period '{}' (expected week, month or year)", other)),
        }
    }
}

/// `days` before `date`, clamped at the first representable date
fn back(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}
