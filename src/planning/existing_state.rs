//! Reconstruction of planner state from assignments committed by earlier runs.

use std::collections::HashMap;

use super::WorkloadTracker;
use crate::models::Assignment;

/// Tracker counters and scheduled employers rebuilt from prior assignments.
///
/// Built once per run, before any new assignment is produced, so repeated
/// runs over the same horizon never double-book a controller's week and never
/// schedule an employer twice.
#[derive(Debug, Clone, Default)]
pub struct ExistingState {
    tracker: WorkloadTracker,
    scheduled: HashMap<String, Assignment>,
}

impl ExistingState {
    /// Seeds the state from previously committed assignments.
    ///
    /// If an employer appears more than once, the earliest assignment is
    /// kept as its scheduled one; every row still counts toward workload.
    pub fn load(assignments: &[Assignment]) -> Self {
        let tracker = WorkloadTracker::seeded(assignments);
        let mut scheduled: HashMap<String, Assignment> = HashMap::new();
        for assignment in assignments {
            scheduled
                .entry(assignment.employer_id.clone())
                .and_modify(|kept| {
                    if assignment.date < kept.date {
                        *kept = assignment.clone();
                    }
                })
                .or_insert_with(|| assignment.clone());
        }
        Self { tracker, scheduled }
    }

    /// Returns true if the employer already holds an assignment.
    pub fn is_scheduled(&self, employer_id: &str) -> bool {
        self.scheduled.contains_key(employer_id)
    }

    /// The existing assignment of an employer.
    pub fn assignment_of(&self, employer_id: &str) -> Option<&Assignment> {
        self.scheduled.get(employer_id)
    }

    /// Number of employers already scheduled.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Splits the state into the seeded tracker and the scheduled employers.
    pub fn into_parts(self) -> (WorkloadTracker, HashMap<String, Assignment>) {
        (self.tracker, self.scheduled)
    }

    /// The seeded tracker.
    pub fn tracker(&self) -> &WorkloadTracker {
        &self.tracker
    }
}
