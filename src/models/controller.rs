//! Controller model and leave records.
//!
//! Controllers are the inspectors being scheduled. They are read-only to the
//! planner: it only reads their center, role tag and leave calendar.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The role tag a user must carry to receive inspections.
pub const CONTROLLER_ROLE: &str = "controller";

/// Represents an inspector attached to exactly one center.
///
/// # Example
///
/// ```
/// use inspection_planner::models::Controller;
/// use chrono::NaiveDate;
///
/// let mut controller = Controller::new("ctl_001", "ctr_north");
/// controller
///     .leave_dates
///     .insert(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
///
/// assert!(controller.has_role("controller"));
/// assert!(controller.is_on_leave(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    /// Unique identifier for the controller.
    pub id: String,
    /// The center this controller belongs to.
    pub center_id: String,
    /// Role tag; only controllers tagged with the configured role participate.
    pub role: String,
    /// Dates on which the controller is unavailable.
    #[serde(default)]
    pub leave_dates: BTreeSet<NaiveDate>,
}

impl Controller {
    /// Creates a controller with the default role tag and no leave.
    pub fn new(id: impl Into<String>, center_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            center_id: center_id.into(),
            role: CONTROLLER_ROLE.to_string(),
            leave_dates: BTreeSet::new(),
        }
    }

    /// Returns true if the controller carries the given role tag.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Returns true if the controller is on leave on `date`.
    pub fn is_on_leave(&self, date: NaiveDate) -> bool {
        self.leave_dates.contains(&date)
    }
}

/// A single day of leave for a controller, as delivered by a leave import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDay {
    /// The controller on leave.
    pub controller_id: String,
    /// The day of leave.
    pub date: NaiveDate,
}
