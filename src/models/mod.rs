//! Core data models for the inspection planner.
//!
//! This module contains the plain records the planner consumes and produces.

mod assignment;
mod calendar;
mod controller;
mod employer;
mod planning_input;
mod planning_report;

pub use assignment::Assignment;
pub use calendar::{Holiday, WeekKey};
pub use controller::{CONTROLLER_ROLE, Controller, LeaveDay};
pub use employer::{Center, Employer};
pub use planning_input::PlanningInput;
pub use planning_report::{
    EmployerOutcome, EmployerReport, PlanningReport, PlanningTotals, UnscheduledReason,
};
