//! The planner: one complete, transactional planning run.
//!
//! A run validates its input, rebuilds state from the assignments committed
//! by earlier runs, orders the candidates, lets the engine place every
//! unscheduled employer, and writes the new assignments to the store in a
//! single transaction.

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    Assignment, Controller, Employer, EmployerOutcome, EmployerReport, Holiday, PlanningInput,
    PlanningReport, PlanningTotals, UnscheduledReason,
};
use crate::planning::{
    AssignmentEngine, BusinessCalendar, ExistingState, Horizon, WeekOrder, merge_leave_days,
    order_employers, validate_input,
};
use crate::store::{AssignmentStore, StoreError};

/// Validated input ready for the engine.
struct PreparedRun {
    controllers: Vec<Controller>,
    calendar: BusinessCalendar,
}

/// Runs the inspection planning.
///
/// # Example
///
/// ```
/// use inspection_planner::config::PlannerConfig;
/// use inspection_planner::models::{Center, Controller, Employer, PlanningInput};
/// use inspection_planner::planning::Horizon;
/// use inspection_planner::planner::Planner;
/// use inspection_planner::store::InMemoryStore;
/// use chrono::NaiveDate;
///
/// let input = PlanningInput::new()
///     .with_center(Center::new("ctr_1", "North"))
///     .with_controller(Controller::new("ctl_1", "ctr_1"))
///     .with_employer(Employer::new("emp_1", "ctr_1", 10));
/// let horizon = Horizon::new(
///     NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 11, 6).unwrap(),
/// )
/// .unwrap();
///
/// let planner = Planner::new(PlannerConfig::default().with_seed(1));
/// let mut store = InMemoryStore::new();
/// let report = planner.run(&input, horizon, &mut store).unwrap();
///
/// assert_eq!(report.totals.created, 1);
/// assert_eq!(store.assignments().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner with the given configuration.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Returns the planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans from today through December 31 and persists into `store`.
    pub fn run_through_year_end<S: AssignmentStore + ?Sized>(
        &self,
        input: &PlanningInput,
        store: &mut S,
    ) -> PlannerResult<PlanningReport> {
        let horizon = Horizon::through_year_end(Local::now().date_naive());
        self.run(input, horizon, store)
    }

    /// Plans `horizon` and persists the new assignments into `store`.
    ///
    /// All new assignments are written in one transaction. If the store
    /// rejects any of them, or the commit itself, the transaction is rolled
    /// back and the error is returned; assignments from earlier runs are
    /// left untouched.
    pub fn run<S: AssignmentStore + ?Sized>(
        &self,
        input: &PlanningInput,
        horizon: Horizon,
        store: &mut S,
    ) -> PlannerResult<PlanningReport> {
        let existing = store.load_assignments().map_err(store_unavailable)?;
        let prepared = self.prepare(input, horizon, &existing)?;

        store.begin().map_err(store_unavailable)?;
        let result = self.execute(&prepared, &input.employers, &existing, |assignment| {
            store
                .insert(assignment)
                .map_err(|err| PlannerError::Persistence {
                    employer_id: assignment.employer_id.clone(),
                    controller_id: assignment.controller_id.clone(),
                    message: err.to_string(),
                })
        });

        let report = match result {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "Planning run aborted, rolling back");
                store.rollback();
                return Err(err);
            }
        };

        if let Err(err) = store.commit() {
            warn!(error = %err, run_id = %report.run_id, "Commit rejected, rolling back");
            store.rollback();
            return Err(PlannerError::CommitFailed {
                created: report.totals.created,
                message: err.to_string(),
            });
        }

        Ok(report)
    }

    /// Plans `horizon` against `existing` assignments without persisting.
    pub fn plan(
        &self,
        input: &PlanningInput,
        horizon: Horizon,
        existing: &[Assignment],
    ) -> PlannerResult<PlanningReport> {
        let prepared = self.prepare(input, horizon, existing)?;
        self.execute(&prepared, &input.employers, existing, |_| Ok(()))
    }

    fn prepare(
        &self,
        input: &PlanningInput,
        horizon: Horizon,
        existing: &[Assignment],
    ) -> PlannerResult<PreparedRun> {
        validate_input(input, existing)?;
        let controllers = merge_leave_days(input)?;

        let holidays: Vec<Holiday> = self
            .config
            .holidays()
            .iter()
            .chain(input.holidays.iter())
            .cloned()
            .collect();
        let calendar = BusinessCalendar::new(horizon, &holidays, &controllers);

        Ok(PreparedRun {
            controllers,
            calendar,
        })
    }

    fn execute<F>(
        &self,
        prepared: &PreparedRun,
        employers: &[Employer],
        existing: &[Assignment],
        persist: F,
    ) -> PlannerResult<PlanningReport>
    where
        F: FnMut(&Assignment) -> PlannerResult<()>,
    {
        let run_id = Uuid::new_v4();
        let seed = self.config.settings().seed.unwrap_or_else(rand::random);
        let horizon = prepared.calendar.horizon();

        let span = info_span!("planning_run", run_id = %run_id, seed);
        let _guard = span.enter();

        info!(
            start = %horizon.start(),
            end = %horizon.end(),
            employers = employers.len(),
            controllers = prepared.controllers.len(),
            existing = existing.len(),
            business_days = prepared.calendar.business_days().len(),
            "Planning run started"
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let state = ExistingState::load(existing);

        // Employers scheduled by an earlier run go first; the engine reports
        // them without searching a slot.
        let (mut queue, pending): (Vec<&Employer>, Vec<&Employer>) = employers
            .iter()
            .partition(|employer| state.is_scheduled(&employer.id));

        let weeks = WeekOrder::shuffled(prepared.calendar.week_keys(), &mut rng);
        queue.extend(order_employers(
            &pending,
            employers.len(),
            weeks.len(),
            &mut rng,
        ));

        let mut engine = AssignmentEngine::new(
            &prepared.calendar,
            &prepared.controllers,
            &self.config.settings().controller_role,
            state,
        );
        let reports = engine.schedule(&queue, &weeks, &mut rng, persist)?;

        let assignments: Vec<Assignment> = reports
            .iter()
            .filter_map(|report| match &report.outcome {
                EmployerOutcome::Scheduled {
                    assignment,
                    existing: false,
                } => Some(assignment.clone()),
                _ => None,
            })
            .collect();

        let totals = totals_of(&reports);
        info!(
            created = totals.created,
            already_scheduled = totals.already_scheduled,
            no_controllers = totals.no_controllers,
            horizon_exhausted = totals.horizon_exhausted,
            "{} assignments created",
            totals.created
        );

        Ok(PlanningReport {
            run_id,
            seed,
            horizon,
            assignments,
            employers: reports,
            totals,
        })
    }
}

fn totals_of(reports: &[EmployerReport]) -> PlanningTotals {
    let mut totals = PlanningTotals::default();
    for report in reports {
        match &report.outcome {
            EmployerOutcome::Scheduled { existing: true, .. } => totals.already_scheduled += 1,
            EmployerOutcome::Scheduled { existing: false, .. } => totals.created += 1,
            EmployerOutcome::Unscheduled {
                reason: UnscheduledReason::NoControllers,
            } => totals.no_controllers += 1,
            EmployerOutcome::Unscheduled {
                reason: UnscheduledReason::HorizonExhausted,
            } => totals.horizon_exhausted += 1,
        }
    }
    totals
}

fn store_unavailable(err: StoreError) -> PlannerError {
    PlannerError::StoreUnavailable {
        message: err.to_string(),
    }
}
