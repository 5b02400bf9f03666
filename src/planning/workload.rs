//! Workload tracking for fairness decisions.
//!
//! The tracker holds three counters: assignments per controller, occupied ISO
//! weeks per controller, and a global per-weekday load. It has a single
//! writer, the assignment engine, and is never shared across threads during
//! a run.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Weekday};

use crate::models::{Assignment, WeekKey};

/// Number of business weekdays (Monday to Friday).
pub const WORKING_WEEKDAYS: usize = 5;

/// Mutable per-run counters steering controller and weekday choice.
///
/// # Example
///
/// ```
/// use inspection_planner::models::WeekKey;
/// use inspection_planner::planning::WorkloadTracker;
/// use chrono::Weekday;
///
/// let mut tracker = WorkloadTracker::new();
/// let week = WeekKey::new(2026, 45);
///
/// assert!(tracker.is_week_free("ctl_001", week));
/// tracker.commit("ctl_001", week, Weekday::Tue);
/// assert!(!tracker.is_week_free("ctl_001", week));
/// assert_eq!(tracker.assignment_count("ctl_001"), 1);
/// assert_eq!(tracker.weekday_load(Weekday::Tue), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkloadTracker {
    assignment_count: HashMap<String, usize>,
    occupied_weeks: HashMap<String, HashSet<WeekKey>>,
    weekday_load: [usize; WORKING_WEEKDAYS],
}

impl WorkloadTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker seeded from previously committed assignments.
    ///
    /// Seeding only happens through this constructor, so a tracker can never
    /// be seeded twice.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a Assignment>) -> Self {
        let mut tracker = Self::new();
        for assignment in existing {
            tracker.commit(
                &assignment.controller_id,
                assignment.week_key(),
                assignment.date.weekday(),
            );
        }
        tracker
    }

    /// Returns true if the controller holds no assignment in `week`.
    pub fn is_week_free(&self, controller_id: &str, week: WeekKey) -> bool {
        self.occupied_weeks
            .get(controller_id)
            .is_none_or(|weeks| !weeks.contains(&week))
    }

    /// Records one accepted assignment in all three counters.
    ///
    /// Weekend dates (only possible for imported assignments) still count
    /// toward the controller's total and occupy its week, but carry no
    /// weekday load.
    pub fn commit(&mut self, controller_id: &str, week: WeekKey, weekday: Weekday) {
        *self
            .assignment_count
            .entry(controller_id.to_string())
            .or_insert(0) += 1;
        self.occupied_weeks
            .entry(controller_id.to_string())
            .or_default()
            .insert(week);
        if let Some(load) = self.weekday_load.get_mut(weekday.num_days_from_monday() as usize) {
            *load += 1;
        }
    }

    /// Number of assignments held by the controller.
    pub fn assignment_count(&self, controller_id: &str) -> usize {
        self.assignment_count
            .get(controller_id)
            .copied()
            .unwrap_or(0)
    }

    /// Global number of assignments falling on `weekday`.
    pub fn weekday_load(&self, weekday: Weekday) -> usize {
        self.weekday_load
            .get(weekday.num_days_from_monday() as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Monday to Friday loads.
    pub fn weekday_loads(&self) -> [usize; WORKING_WEEKDAYS] {
        self.weekday_load
    }

    /// Weeks occupied by the controller.
    pub fn occupied_weeks(&self, controller_id: &str) -> Option<&HashSet<WeekKey>> {
        self.occupied_weeks.get(controller_id)
    }
}
