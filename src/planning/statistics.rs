//! Workload statistics over a set of assignments.
//!
//! Gives supervisors the distribution views of a schedule: inspections per
//! controller, per weekday and per week, and a controller's own planning.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use super::workload::WORKING_WEEKDAYS;
use crate::models::{Assignment, WeekKey};

/// Aggregated counters over assignments.
///
/// # Example
///
/// ```
/// use inspection_planner::models::Assignment;
/// use inspection_planner::planning::WorkloadStatistics;
/// use chrono::NaiveDate;
///
/// let assignments = vec![
///     Assignment::new("ctl_1", "emp_1", NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()),
///     Assignment::new("ctl_1", "emp_2", NaiveDate::from_ymd_opt(2026, 11, 10).unwrap()),
///     Assignment::new("ctl_2", "emp_3", NaiveDate::from_ymd_opt(2026, 11, 4).unwrap()),
/// ];
/// let stats = WorkloadStatistics::from_assignments(&assignments);
///
/// assert_eq!(stats.total(), 3);
/// assert_eq!(stats.controller_total("ctl_1"), 2);
/// assert_eq!(stats.per_weekday(), [1, 1, 1, 0, 0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkloadStatistics {
    per_controller: BTreeMap<String, usize>,
    per_weekday: [usize; WORKING_WEEKDAYS],
    per_week: BTreeMap<WeekKey, usize>,
    by_controller: HashMap<String, Vec<Assignment>>,
    total: usize,
}

impl WorkloadStatistics {
    /// Computes statistics over `assignments`.
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut stats = Self::default();
        for assignment in assignments {
            *stats
                .per_controller
                .entry(assignment.controller_id.clone())
                .or_insert(0) += 1;
            if let Some(count) = stats
                .per_weekday
                .get_mut(assignment.date.weekday().num_days_from_monday() as usize)
            {
                *count += 1;
            }
            *stats.per_week.entry(assignment.week_key()).or_insert(0) += 1;
            stats
                .by_controller
                .entry(assignment.controller_id.clone())
                .or_default()
                .push(assignment.clone());
            stats.total += 1;
        }
        for planning in stats.by_controller.values_mut() {
            planning.sort_by(|a, b| a.date.cmp(&b.date));
        }
        stats
    }

    /// Total number of assignments.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Assignments per controller, keyed by controller id.
    pub fn per_controller(&self) -> &BTreeMap<String, usize> {
        &self.per_controller
    }

    /// Number of assignments of one controller.
    pub fn controller_total(&self, controller_id: &str) -> usize {
        self.per_controller.get(controller_id).copied().unwrap_or(0)
    }

    /// Monday to Friday assignment counts.
    pub fn per_weekday(&self) -> [usize; WORKING_WEEKDAYS] {
        self.per_weekday
    }

    /// Assignments per ISO week, all controllers together.
    pub fn per_week(&self) -> &BTreeMap<WeekKey, usize> {
        &self.per_week
    }

    /// A controller's assignments in date order.
    pub fn assignments_for_controller(&self, controller_id: &str) -> &[Assignment] {
        self.by_controller
            .get(controller_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Difference between the busiest and the least busy of `controller_ids`.
    ///
    /// Controllers without any assignment count as zero.
    pub fn max_controller_spread<'a>(
        &self,
        controller_ids: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        let totals: Vec<usize> = controller_ids
            .into_iter()
            .map(|id| self.controller_total(id))
            .collect();
        match (totals.iter().max(), totals.iter().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assignment(controller: &str, employer: &str, m: u32, d: u32) -> Assignment {
        Assignment::new(
            controller,
            employer,
            NaiveDate::from_ymd_opt(2026, m, d).unwrap(),
        )
    }

    #[test]
    fn test_empty_statistics() {
        let stats = WorkloadStatistics::from_assignments(&[]);
        assert_eq!(stats.total(), 0);
        assert!(stats.per_controller().is_empty());
        assert_eq!(stats.max_controller_spread(["ctl_1", "ctl_2"]), 0);
    }

    #[test]
    fn test_per_week_groups_all_controllers() {
        let assignments = vec![
            assignment("ctl_1", "emp_1", 11, 2),
            assignment("ctl_2", "emp_2", 11, 6),
            assignment("ctl_1", "emp_3", 11, 9),
        ];
        let stats = WorkloadStatistics::from_assignments(&assignments);
        assert_eq!(stats.per_week().get(&WeekKey::new(2026, 45)), Some(&2));
        assert_eq!(stats.per_week().get(&WeekKey::new(2026, 46)), Some(&1));
    }

    #[test]
    fn test_assignments_for_controller_are_date_sorted() {
        let assignments = vec![
            assignment("ctl_1", "emp_1", 12, 1),
            assignment("ctl_1", "emp_2", 11, 3),
            assignment("ctl_2", "emp_3", 11, 4),
        ];
        let stats = WorkloadStatistics::from_assignments(&assignments);
        let planning = stats.assignments_for_controller("ctl_1");
        assert_eq!(planning.len(), 2);
        assert_eq!(planning[0].employer_id, "emp_2");
        assert_eq!(planning[1].employer_id, "emp_1");
        assert!(stats.assignments_for_controller("ctl_9").is_empty());
    }

    #[test]
    fn test_spread_counts_idle_controllers_as_zero() {
        let assignments = vec![
            assignment("ctl_1", "emp_1", 11, 2),
            assignment("ctl_1", "emp_2", 11, 9),
        ];
        let stats = WorkloadStatistics::from_assignments(&assignments);
        assert_eq!(stats.max_controller_spread(["ctl_1", "ctl_2"]), 2);
        assert_eq!(stats.max_controller_spread(["ctl_1"]), 0);
    }
}
