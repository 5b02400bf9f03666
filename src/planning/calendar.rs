//! Planning horizon and business-day calendar.
//!
//! A business day is a Monday to Friday that is not a public holiday. The
//! calendar is computed once per run and is read-only afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Controller, Holiday, WeekKey};

/// The inclusive date range a run plans into.
///
/// Production runs use [`Horizon::through_year_end`]: from today to December
/// 31 of the current year.
///
/// # Example
///
/// ```
/// use inspection_planner::planning::Horizon;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// let horizon = Horizon::through_year_end(today);
/// assert_eq!(horizon.end(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
/// assert!(horizon.contains(today));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HorizonBounds")]
pub struct Horizon {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form of a [`Horizon`].
#[derive(Deserialize)]
struct HorizonBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<HorizonBounds> for Horizon {
    type Error = PlannerError;

    fn try_from(bounds: HorizonBounds) -> PlannerResult<Self> {
        Horizon::new(bounds.start, bounds.end)
    }
}

impl Horizon {
    /// Creates a horizon, rejecting a start after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> PlannerResult<Self> {
        if start > end {
            return Err(PlannerError::InvalidHorizon { start, end });
        }
        Ok(Self { start, end })
    }

    /// The horizon from `today` through December 31 of the same year.
    pub fn through_year_end(today: NaiveDate) -> Self {
        let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
        Self { start: today, end }
    }

    /// First day of the horizon.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the horizon.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` lies within the horizon (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every date of the horizon in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// Returns true if `date` is a weekday and not a holiday.
pub fn is_business_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&date)
}

/// Returns every business day between `start` and `end`, both inclusive.
///
/// # Example
///
/// ```
/// use inspection_planner::planning::business_days;
/// use chrono::NaiveDate;
/// use std::collections::HashSet;
///
/// let start = NaiveDate::from_ymd_opt(2026, 11, 9).unwrap(); // Monday
/// let end = NaiveDate::from_ymd_opt(2026, 11, 15).unwrap(); // Sunday
/// let holidays = HashSet::from([NaiveDate::from_ymd_opt(2026, 11, 11).unwrap()]);
///
/// assert_eq!(business_days(start, end, &holidays).len(), 4);
/// ```
pub fn business_days(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HashSet<NaiveDate>,
) -> BTreeSet<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_business_day(*d, holidays))
        .collect()
}

/// Business days and leave lookups for one run.
#[derive(Debug, Clone)]
pub struct BusinessCalendar {
    horizon: Horizon,
    business_days: BTreeSet<NaiveDate>,
    weeks: BTreeMap<WeekKey, Vec<NaiveDate>>,
    leave: HashMap<String, BTreeSet<NaiveDate>>,
}

impl BusinessCalendar {
    /// Builds the calendar of `horizon` from holiday and controller records.
    ///
    /// Every week touched by the horizon gets an entry, including weeks whose
    /// days are all weekends or holidays. Leave outside the horizon is dropped.
    pub fn new(horizon: Horizon, holidays: &[Holiday], controllers: &[Controller]) -> Self {
        let holiday_dates: HashSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();
        let business_days = business_days(horizon.start(), horizon.end(), &holiday_dates);

        let mut weeks: BTreeMap<WeekKey, Vec<NaiveDate>> = BTreeMap::new();
        for day in horizon.days() {
            let entry = weeks.entry(WeekKey::from_date(day)).or_default();
            if business_days.contains(&day) {
                entry.push(day);
            }
        }

        let mut leave: HashMap<String, BTreeSet<NaiveDate>> = HashMap::new();
        for controller in controllers {
            let in_horizon = controller
                .leave_dates
                .iter()
                .copied()
                .filter(|d| horizon.contains(*d));
            leave
                .entry(controller.id.clone())
                .or_default()
                .extend(in_horizon);
        }

        Self {
            horizon,
            business_days,
            weeks,
            leave,
        }
    }

    /// The horizon this calendar covers.
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// All business days of the horizon.
    pub fn business_days(&self) -> &BTreeSet<NaiveDate> {
        &self.business_days
    }

    /// Returns true if `date` is a business day of the horizon.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        self.business_days.contains(&date)
    }

    /// Distinct week keys of the horizon in chronological order.
    pub fn week_keys(&self) -> Vec<WeekKey> {
        self.weeks.keys().copied().collect()
    }

    /// Business days of the horizon falling in `week`, in date order.
    pub fn business_days_in_week(&self, week: WeekKey) -> &[NaiveDate] {
        self.weeks.get(&week).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The controller's leave days within the horizon.
    pub fn leave_days_of(&self, controller_id: &str) -> Option<&BTreeSet<NaiveDate>> {
        self.leave.get(controller_id)
    }

    /// Returns true if the controller is on leave on `date`.
    pub fn is_on_leave(&self, controller_id: &str, date: NaiveDate) -> bool {
        self.leave
            .get(controller_id)
            .is_some_and(|days| days.contains(&date))
    }
}
