//! Planning logic for the inspection planner.
//!
//! This module contains the business-day calendar, the workload tracker, the
//! candidate orderings, input validation, the reconstruction of state from
//! earlier runs, the greedy assignment engine, and workload statistics.

mod calendar;
mod engine;
mod existing_state;
mod ordering;
mod statistics;
mod validation;
mod workload;

pub use calendar::{BusinessCalendar, Horizon, business_days, is_business_day};
pub use engine::AssignmentEngine;
pub use existing_state::ExistingState;
pub use ordering::{WeekOrder, order_controllers, order_employers, order_weekdays};
pub use statistics::WorkloadStatistics;
pub use validation::{merge_leave_days, validate_input};
pub use workload::{WORKING_WEEKDAYS, WorkloadTracker};
