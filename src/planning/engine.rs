//! The assignment engine: greedy, single-pass placement of employers.
//!
//! For each employer, in the order produced by
//! [`order_employers`](super::order_employers), the engine walks the weeks in
//! a per-employer random order, then the center's controllers from least to
//! most loaded, then the week's business days from least to most used
//! weekday. The first (week, controller, day) triple that is free, not on
//! leave and not already occupied wins. There is no backtracking.
//!
//! Running out of slots is not an error: the employer is reported as
//! [`UnscheduledReason::HorizonExhausted`] and the engine moves on. Only the
//! persistence callback can abort a run.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use tracing::{debug, warn};

use super::{BusinessCalendar, ExistingState, WeekOrder, WorkloadTracker};
use super::{order_controllers, order_weekdays};
use crate::error::PlannerResult;
use crate::models::{
    Assignment, Controller, Employer, EmployerOutcome, EmployerReport, UnscheduledReason, WeekKey,
};

/// Places employers one at a time while keeping the workload tracker current.
///
/// The engine is the single writer of its tracker; it is not meant to be
/// shared between threads.
#[derive(Debug)]
pub struct AssignmentEngine<'a> {
    calendar: &'a BusinessCalendar,
    controllers_by_center: HashMap<&'a str, Vec<&'a Controller>>,
    tracker: WorkloadTracker,
    scheduled: HashMap<String, Assignment>,
}

impl<'a> AssignmentEngine<'a> {
    /// Creates an engine over the eligible controllers and the seeded state.
    ///
    /// Controllers whose role differs from `controller_role` never receive an
    /// assignment.
    pub fn new(
        calendar: &'a BusinessCalendar,
        controllers: &'a [Controller],
        controller_role: &str,
        existing: ExistingState,
    ) -> Self {
        let mut controllers_by_center: HashMap<&'a str, Vec<&'a Controller>> = HashMap::new();
        for controller in controllers.iter().filter(|c| c.has_role(controller_role)) {
            controllers_by_center
                .entry(controller.center_id.as_str())
                .or_default()
                .push(controller);
        }

        let (tracker, scheduled) = existing.into_parts();
        Self {
            calendar,
            controllers_by_center,
            tracker,
            scheduled,
        }
    }

    /// Schedules `employers` in the given order.
    ///
    /// `persist` is called once for every accepted assignment, before the
    /// tracker is updated. If it fails, the run stops and the error is
    /// returned as is.
    pub fn schedule<R, F>(
        &mut self,
        employers: &[&Employer],
        weeks: &WeekOrder,
        rng: &mut R,
        mut persist: F,
    ) -> PlannerResult<Vec<EmployerReport>>
    where
        R: Rng + ?Sized,
        F: FnMut(&Assignment) -> PlannerResult<()>,
    {
        let mut reports = Vec::with_capacity(employers.len());

        for employer in employers {
            if let Some(assignment) = self.scheduled.get(&employer.id) {
                reports.push(EmployerReport {
                    employer_id: employer.id.clone(),
                    outcome: EmployerOutcome::Scheduled {
                        assignment: assignment.clone(),
                        existing: true,
                    },
                });
                continue;
            }

            let controllers = self.center_controllers(&employer.center_id);
            if controllers.is_empty() {
                warn!(
                    employer_id = %employer.id,
                    center_id = %employer.center_id,
                    "No controller available in center, employer left unscheduled"
                );
                reports.push(unscheduled(employer, UnscheduledReason::NoControllers));
                continue;
            }

            let week_order = weeks.for_employer(rng);
            match self.find_slot(employer, &controllers, &week_order) {
                Some(assignment) => {
                    persist(&assignment)?;
                    self.record(&assignment);
                    debug!(
                        employer_id = %assignment.employer_id,
                        controller_id = %assignment.controller_id,
                        date = %assignment.date,
                        weekday = %assignment.date.weekday(),
                        "Inspection scheduled"
                    );
                    reports.push(EmployerReport {
                        employer_id: employer.id.clone(),
                        outcome: EmployerOutcome::Scheduled {
                            assignment,
                            existing: false,
                        },
                    });
                }
                None => {
                    warn!(
                        employer_id = %employer.id,
                        center_id = %employer.center_id,
                        "No free slot left in horizon, employer left unscheduled"
                    );
                    reports.push(unscheduled(employer, UnscheduledReason::HorizonExhausted));
                }
            }
        }

        Ok(reports)
    }

    /// Searches the first free (week, controller, day) triple for `employer`.
    ///
    /// `controllers` must already be in preference order; weekdays are
    /// ordered here from the current tracker.
    pub fn find_slot(
        &self,
        employer: &Employer,
        controllers: &[&Controller],
        weeks: &[WeekKey],
    ) -> Option<Assignment> {
        for week in weeks {
            let days = order_weekdays(self.calendar.business_days_in_week(*week), &self.tracker);
            if days.is_empty() {
                continue;
            }

            for controller in controllers {
                if !self.tracker.is_week_free(&controller.id, *week) {
                    continue;
                }
                if let Some(day) = self.first_available_day(controller, &days) {
                    return Some(Assignment::new(&controller.id, &employer.id, day));
                }
            }
        }
        None
    }

    /// Records an accepted assignment in the tracker.
    pub fn record(&mut self, assignment: &Assignment) {
        self.tracker.commit(
            &assignment.controller_id,
            assignment.week_key(),
            assignment.date.weekday(),
        );
        self.scheduled
            .insert(assignment.employer_id.clone(), assignment.clone());
    }

    /// The center's eligible controllers, least loaded first.
    pub fn center_controllers(&self, center_id: &str) -> Vec<&'a Controller> {
        self.controllers_by_center
            .get(center_id)
            .map(|controllers| order_controllers(controllers, &self.tracker))
            .unwrap_or_default()
    }

    /// The tracker as updated so far.
    pub fn tracker(&self) -> &WorkloadTracker {
        &self.tracker
    }

    fn first_available_day(
        &self,
        controller: &Controller,
        days: &[NaiveDate],
    ) -> Option<NaiveDate> {
        days.iter()
            .copied()
            .find(|day| !self.calendar.is_on_leave(&controller.id, *day))
    }
}

fn unscheduled(employer: &Employer, reason: UnscheduledReason) -> EmployerReport {
    EmployerReport {
        employer_id: employer.id.clone(),
        outcome: EmployerOutcome::Unscheduled { reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::models::CONTROLLER_ROLE;
    use crate::planning::Horizon;
    use chrono::Weekday;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Monday 2026-11-02 to Sunday 2026-11-15: weeks 45 and 46
    fn two_week_calendar(controllers: &[Controller]) -> BusinessCalendar {
        let horizon = Horizon::new(date(2026, 11, 2), date(2026, 11, 15)).unwrap();
        BusinessCalendar::new(horizon, &[], controllers)
    }

    fn week_order(calendar: &BusinessCalendar, rng: &mut StdRng) -> WeekOrder {
        WeekOrder::shuffled(calendar.week_keys(), rng)
    }

    fn collect(
        engine: &mut AssignmentEngine<'_>,
        employers: &[Employer],
        weeks: &WeekOrder,
        rng: &mut StdRng,
    ) -> (Vec<EmployerReport>, Vec<Assignment>) {
        let refs: Vec<&Employer> = employers.iter().collect();
        let mut persisted = Vec::new();
        let reports = engine
            .schedule(&refs, weeks, rng, |a| {
                persisted.push(a.clone());
                Ok(())
            })
            .unwrap();
        (reports, persisted)
    }

    #[test]
    fn test_single_employer_is_scheduled_on_a_business_day() {
        let controllers = vec![Controller::new("ctl_1", "ctr_1")];
        let calendar = two_week_calendar(&controllers);
        let mut rng = StdRng::seed_from_u64(1);
        let weeks = week_order(&calendar, &mut rng);
        let mut engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::default(),
        );

        let employers = vec![Employer::new("emp_1", "ctr_1", 10)];
        let (reports, persisted) = collect(&mut engine, &employers, &weeks, &mut rng);

        assert_eq!(persisted.len(), 1);
        assert!(calendar.is_business_day(persisted[0].date));
        assert!(reports[0].outcome.is_scheduled());
    }

    #[test]
    fn test_one_controller_never_gets_two_employers_in_a_week() {
        let controllers = vec![Controller::new("ctl_1", "ctr_1")];
        let calendar = two_week_calendar(&controllers);
        let mut rng = StdRng::seed_from_u64(2);
        let weeks = week_order(&calendar, &mut rng);
        let mut engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::default(),
        );

        let employers = vec![
            Employer::new("emp_1", "ctr_1", 100),
            Employer::new("emp_2", "ctr_1", 1),
            Employer::new("emp_3", "ctr_1", 50),
        ];
        let (reports, persisted) = collect(&mut engine, &employers, &weeks, &mut rng);

        assert_eq!(persisted.len(), 2);
        assert_ne!(persisted[0].week_key(), persisted[1].week_key());
        let exhausted = reports
            .iter()
            .filter(|r| {
                r.outcome
                    == EmployerOutcome::Unscheduled {
                        reason: UnscheduledReason::HorizonExhausted,
                    }
            })
            .count();
        assert_eq!(exhausted, 1);
    }

    #[test]
    fn test_employer_without_controllers_is_unscheduled() {
        let controllers = vec![Controller::new("ctl_1", "ctr_1")];
        let calendar = two_week_calendar(&controllers);
        let mut rng = StdRng::seed_from_u64(3);
        let weeks = week_order(&calendar, &mut rng);
        let mut engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::default(),
        );

        let employers = vec![Employer::new("emp_1", "ctr_2", 10)];
        let (reports, persisted) = collect(&mut engine, &employers, &weeks, &mut rng);

        assert!(persisted.is_empty());
        assert_eq!(
            reports[0].outcome,
            EmployerOutcome::Unscheduled {
                reason: UnscheduledReason::NoControllers
            }
        );
    }

    #[test]
    fn test_controller_with_other_role_is_not_eligible() {
        let mut supervisor = Controller::new("sup_1", "ctr_1");
        supervisor.role = "supervisor".to_string();
        let controllers = vec![supervisor];
        let calendar = two_week_calendar(&controllers);
        let engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::default(),
        );

        assert!(engine.center_controllers("ctr_1").is_empty());
    }

    #[test]
    fn test_leave_days_are_skipped_within_a_week() {
        let mut controller = Controller::new("ctl_1", "ctr_1");
        for day in 2..=5 {
            controller.leave_dates.insert(date(2026, 11, day));
        }
        let controllers = vec![controller];
        // Week 45 only
        let horizon = Horizon::new(date(2026, 11, 2), date(2026, 11, 8)).unwrap();
        let calendar = BusinessCalendar::new(horizon, &[], &controllers);
        let engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::default(),
        );

        let employer = Employer::new("emp_1", "ctr_1", 1);
        let candidates = engine.center_controllers("ctr_1");
        let slot = engine
            .find_slot(&employer, &candidates, &[WeekKey::new(2026, 45)])
            .unwrap();
        assert_eq!(slot.date, date(2026, 11, 6));
    }

    #[test]
    fn test_find_slot_prefers_least_used_weekday() {
        let controllers = vec![Controller::new("ctl_1", "ctr_1")];
        let calendar = two_week_calendar(&controllers);
        let existing = vec![
            Assignment::new("ctl_1", "emp_0", date(2026, 10, 26)), // Monday, earlier week
        ];
        let engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::load(&existing),
        );

        let employer = Employer::new("emp_1", "ctr_1", 1);
        let candidates = engine.center_controllers("ctr_1");
        let slot = engine
            .find_slot(&employer, &candidates, &[WeekKey::new(2026, 45)])
            .unwrap();
        assert_eq!(slot.date.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_least_loaded_controller_is_tried_first() {
        let controllers = vec![
            Controller::new("ctl_busy", "ctr_1"),
            Controller::new("ctl_idle", "ctr_1"),
        ];
        let calendar = two_week_calendar(&controllers);
        let existing = vec![Assignment::new("ctl_busy", "emp_0", date(2026, 10, 27))];
        let engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::load(&existing),
        );

        let employer = Employer::new("emp_1", "ctr_1", 1);
        let candidates = engine.center_controllers("ctr_1");
        let slot = engine
            .find_slot(&employer, &candidates, &[WeekKey::new(2026, 45)])
            .unwrap();
        assert_eq!(slot.controller_id, "ctl_idle");
    }

    #[test]
    fn test_existing_employer_is_reported_and_not_rescheduled() {
        let controllers = vec![Controller::new("ctl_1", "ctr_1")];
        let calendar = two_week_calendar(&controllers);
        let mut rng = StdRng::seed_from_u64(4);
        let weeks = week_order(&calendar, &mut rng);
        let existing = vec![Assignment::new("ctl_1", "emp_1", date(2026, 11, 3))];
        let mut engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::load(&existing),
        );

        let employers = vec![Employer::new("emp_1", "ctr_1", 10)];
        let (reports, persisted) = collect(&mut engine, &employers, &weeks, &mut rng);

        assert!(persisted.is_empty());
        assert_eq!(
            reports[0].outcome,
            EmployerOutcome::Scheduled {
                assignment: existing[0].clone(),
                existing: true
            }
        );
    }

    #[test]
    fn test_persist_failure_aborts_and_leaves_tracker_untouched() {
        let controllers = vec![Controller::new("ctl_1", "ctr_1")];
        let calendar = two_week_calendar(&controllers);
        let mut rng = StdRng::seed_from_u64(5);
        let weeks = week_order(&calendar, &mut rng);
        let mut engine = AssignmentEngine::new(
            &calendar,
            &controllers,
            CONTROLLER_ROLE,
            ExistingState::default(),
        );

        let employer = Employer::new("emp_1", "ctr_1", 10);
        let result = engine.schedule(&[&employer], &weeks, &mut rng, |a| {
            Err(PlannerError::Persistence {
                employer_id: a.employer_id.clone(),
                controller_id: a.controller_id.clone(),
                message: "disk full".to_string(),
            })
        });

        assert!(matches!(result, Err(PlannerError::Persistence { .. })));
        assert_eq!(engine.tracker().assignment_count("ctl_1"), 0);
    }
}
