//! The assignment, the output unit of a planning run.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::WeekKey;

/// One inspection: a controller visits an employer on a date.
///
/// # Example
///
/// ```
/// use inspection_planner::models::{Assignment, WeekKey};
/// use chrono::{NaiveDate, Weekday};
///
/// let assignment = Assignment::new(
///     "ctl_001",
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
/// );
/// assert_eq!(assignment.weekday(), Weekday::Wed);
/// assert_eq!(assignment.week_key(), WeekKey::new(2026, 43));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// The controller carrying out the inspection.
    pub controller_id: String,
    /// The employer being inspected.
    pub employer_id: String,
    /// The inspection date.
    pub date: NaiveDate,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(
        controller_id: impl Into<String>,
        employer_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            controller_id: controller_id.into(),
            employer_id: employer_id.into(),
            date,
        }
    }

    /// The ISO week this assignment occupies for its controller.
    pub fn week_key(&self) -> WeekKey {
        WeekKey::from_date(self.date)
    }

    /// The weekday of the inspection.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}
