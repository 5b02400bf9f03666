//! Planning report models.
//!
//! This module contains the [`PlanningReport`] type and its associated
//! structures that capture the outputs of a planning run: the new
//! assignments in commit order and one outcome per employer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Assignment;
use crate::planning::Horizon;

/// Why an employer could not be placed in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnscheduledReason {
    /// The employer's center has no eligible controller.
    NoControllers,
    /// Every (week, controller, day) combination of the horizon was occupied,
    /// on leave, or empty of business days.
    HorizonExhausted,
}

impl std::fmt::Display for UnscheduledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnscheduledReason::NoControllers => write!(f, "no controller in center"),
            UnscheduledReason::HorizonExhausted => write!(f, "no free slot in horizon"),
        }
    }
}

/// Terminal state of one employer after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmployerOutcome {
    /// The employer holds an assignment.
    Scheduled {
        /// The assignment.
        assignment: Assignment,
        /// True if the assignment came from a previous run.
        existing: bool,
    },
    /// The employer could not be placed.
    Unscheduled {
        /// Why no slot was found.
        reason: UnscheduledReason,
    },
}

impl EmployerOutcome {
    /// Returns true for [`EmployerOutcome::Scheduled`].
    pub fn is_scheduled(&self) -> bool {
        matches!(self, EmployerOutcome::Scheduled { .. })
    }
}

/// Outcome for a single employer, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerReport {
    /// The employer.
    pub employer_id: String,
    /// What happened to it.
    pub outcome: EmployerOutcome,
}

/// Aggregated counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningTotals {
    /// Assignments produced by this run.
    pub created: usize,
    /// Employers that already held an assignment before the run.
    pub already_scheduled: usize,
    /// Employers skipped because their center has no controller.
    pub no_controllers: usize,
    /// Employers for which no slot was left in the horizon.
    pub horizon_exhausted: usize,
}

impl PlanningTotals {
    /// Total employers left without an assignment.
    pub fn unscheduled(&self) -> usize {
        self.no_controllers + self.horizon_exhausted
    }
}

/// The complete result of a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningReport {
    /// Correlation id of the run.
    pub run_id: Uuid,
    /// Seed of the random source, for replaying the run.
    pub seed: u64,
    /// The horizon that was planned.
    pub horizon: Horizon,
    /// New assignments, in commit order.
    pub assignments: Vec<Assignment>,
    /// One entry per employer, in the order they were processed.
    pub employers: Vec<EmployerReport>,
    /// Aggregated counts.
    pub totals: PlanningTotals,
}

impl PlanningReport {
    /// Ids of employers that ended the run without an assignment.
    pub fn unscheduled_employers(&self) -> impl Iterator<Item = (&str, UnscheduledReason)> {
        self.employers.iter().filter_map(|report| match report.outcome {
            EmployerOutcome::Unscheduled { reason } => Some((report.employer_id.as_str(), reason)),
            EmployerOutcome::Scheduled { .. } => None,
        })
    }

    /// Looks up the outcome of one employer.
    pub fn outcome_of(&self, employer_id: &str) -> Option<&EmployerOutcome> {
        self.employers
            .iter()
            .find(|report| report.employer_id == employer_id)
            .map(|report| &report.outcome)
    }
}
