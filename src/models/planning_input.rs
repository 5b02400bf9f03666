//! The bundle of records a planning run consumes.

use serde::{Deserialize, Serialize};

use super::{Center, Controller, Employer, Holiday, LeaveDay};

/// Everything the surrounding system hands to the planner for one run.
///
/// Leave can be delivered either directly on [`Controller::leave_dates`] or
/// as separate [`LeaveDay`] records; both are merged before planning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningInput {
    /// All centers.
    #[serde(default)]
    pub centers: Vec<Center>,
    /// All users that may act as controllers.
    #[serde(default)]
    pub controllers: Vec<Controller>,
    /// All employers, scheduled or not.
    #[serde(default)]
    pub employers: Vec<Employer>,
    /// Public holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Leave records not already folded into the controllers.
    #[serde(default)]
    pub leave_days: Vec<LeaveDay>,
}

impl PlanningInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a center.
    pub fn with_center(mut self, center: Center) -> Self {
        self.centers.push(center);
        self
    }

    /// Adds a controller.
    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controllers.push(controller);
        self
    }

    /// Adds an employer.
    pub fn with_employer(mut self, employer: Employer) -> Self {
        self.employers.push(employer);
        self
    }

    /// Adds holidays.
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = Holiday>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    /// Adds a leave record.
    pub fn with_leave_day(mut self, leave_day: LeaveDay) -> Self {
        self.leave_days.push(leave_day);
        self
    }
}
