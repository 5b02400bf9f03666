//! Calendar primitives: public holidays and ISO week keys.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A date marked non-business regardless of its weekday.
///
/// # Example
///
/// ```
/// use inspection_planner::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 11, 11).unwrap(),
///     name: "Armistice".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    #[serde(default)]
    pub name: String,
}

/// Identifies a calendar week as (ISO year, ISO week number).
///
/// Used purely as a grouping and occupancy key: a controller holds at most
/// one assignment per `WeekKey`. Dates around New Year can belong to the ISO
/// year before or after their calendar year.
///
/// # Example
///
/// ```
/// use inspection_planner::models::WeekKey;
/// use chrono::NaiveDate;
///
/// // 2026-12-31 is a Thursday in ISO week 53 of 2026.
/// let key = WeekKey::from_date(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
/// assert_eq!(key, WeekKey::new(2026, 53));
///
/// // 2024-12-30 is a Monday already in ISO week 1 of 2025.
/// let key = WeekKey::from_date(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
/// assert_eq!(key, WeekKey::new(2025, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    /// The ISO week-numbering year.
    pub iso_year: i32,
    /// The ISO week number (1..=53).
    pub week: u32,
}

impl WeekKey {
    /// Creates a week key.
    pub fn new(iso_year: i32, week: u32) -> Self {
        Self { iso_year, week }
    }

    /// Returns the week key containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.iso_year, self.week)
    }
}
