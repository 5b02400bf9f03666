//! Referential-integrity checks run before any assignment is produced.
//!
//! Detects:
//! - Duplicate center, controller and employer ids
//! - Controllers and employers pointing at a missing center
//! - Existing assignments pointing at a missing controller or employer
//! - Leave records pointing at a missing controller
//!
//! Any of these means the input is inconsistent, so the run stops with the
//! first error found, before the store sees a single write.

use std::collections::HashSet;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Assignment, Controller, PlanningInput};

/// Validates `input` and the previously committed assignments.
pub fn validate_input(input: &PlanningInput, existing: &[Assignment]) -> PlannerResult<()> {
    let center_ids = unique_ids("center", input.centers.iter().map(|c| c.id.as_str()))?;
    let controller_ids = unique_ids(
        "controller",
        input.controllers.iter().map(|c| c.id.as_str()),
    )?;
    let employer_ids = unique_ids("employer", input.employers.iter().map(|e| e.id.as_str()))?;

    for controller in &input.controllers {
        if !center_ids.contains(controller.center_id.as_str()) {
            return Err(PlannerError::UnknownCenter {
                entity: "controller",
                entity_id: controller.id.clone(),
                center_id: controller.center_id.clone(),
            });
        }
    }

    for employer in &input.employers {
        if !center_ids.contains(employer.center_id.as_str()) {
            return Err(PlannerError::UnknownCenter {
                entity: "employer",
                entity_id: employer.id.clone(),
                center_id: employer.center_id.clone(),
            });
        }
    }

    for leave_day in &input.leave_days {
        if !controller_ids.contains(leave_day.controller_id.as_str()) {
            return Err(PlannerError::UnknownController {
                context: "leave day",
                controller_id: leave_day.controller_id.clone(),
            });
        }
    }

    for assignment in existing {
        if !controller_ids.contains(assignment.controller_id.as_str()) {
            return Err(PlannerError::UnknownController {
                context: "existing assignment",
                controller_id: assignment.controller_id.clone(),
            });
        }
        if !employer_ids.contains(assignment.employer_id.as_str()) {
            return Err(PlannerError::UnknownEmployer {
                employer_id: assignment.employer_id.clone(),
            });
        }
    }

    Ok(())
}

/// Returns the controllers with separate leave records folded into their
/// leave sets.
///
/// Expects `input` to have passed [`validate_input`]; leave records for
/// unknown controllers are rejected again here rather than dropped.
pub fn merge_leave_days(input: &PlanningInput) -> PlannerResult<Vec<Controller>> {
    let mut controllers = input.controllers.clone();
    for leave_day in &input.leave_days {
        let controller = controllers
            .iter_mut()
            .find(|c| c.id == leave_day.controller_id)
            .ok_or_else(|| PlannerError::UnknownController {
                context: "leave day",
                controller_id: leave_day.controller_id.clone(),
            })?;
        controller.leave_dates.insert(leave_day.date);
    }
    Ok(controllers)
}

fn unique_ids<'a>(
    entity: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> PlannerResult<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(PlannerError::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}
