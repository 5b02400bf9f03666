//! Error types for the inspection planner.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every fatal condition a planning run can hit. Constraint exhaustion
//! (an employer that cannot be placed) is not an error: it is reported as an
//! [`UnscheduledReason`](crate::models::UnscheduledReason) in the run report.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the inspection planner.
///
/// # Example
///
/// ```
/// use inspection_planner::error::PlannerError;
///
/// let error = PlannerError::UnknownEmployer {
///     employer_id: "emp_404".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Unknown employer 'emp_404' referenced by existing assignment"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The planning horizon starts after it ends.
    #[error("Invalid planning horizon: {start} is after {end}")]
    InvalidHorizon {
        /// First day of the horizon.
        start: NaiveDate,
        /// Last day of the horizon.
        end: NaiveDate,
    },

    /// An employer or controller points at a center that does not exist.
    #[error("Unknown center '{center_id}' referenced by {entity} '{entity_id}'")]
    UnknownCenter {
        /// The kind of record holding the reference ("employer", "controller").
        entity: &'static str,
        /// The id of the record holding the reference.
        entity_id: String,
        /// The missing center id.
        center_id: String,
    },

    /// A record points at a controller that does not exist.
    #[error("Unknown controller '{controller_id}' referenced by {context}")]
    UnknownController {
        /// The kind of record holding the reference ("leave day",
        /// "existing assignment").
        context: &'static str,
        /// The missing controller id.
        controller_id: String,
    },

    /// An existing assignment points at an employer that does not exist.
    #[error("Unknown employer '{employer_id}' referenced by existing assignment")]
    UnknownEmployer {
        /// The missing employer id.
        employer_id: String,
    },

    /// Two records of the same kind share an id.
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId {
        /// The kind of record ("center", "controller", "employer").
        entity: &'static str,
        /// The duplicated id.
        id: String,
    },

    /// The persistence collaborator could not be read or opened.
    #[error("Assignment store unavailable: {message}")]
    StoreUnavailable {
        /// The store's description of the failure.
        message: String,
    },

    /// The persistence collaborator rejected a write; the run was rolled back.
    #[error("Failed to persist employer '{employer_id}' for '{controller_id}': {message}")]
    Persistence {
        /// Employer of the rejected assignment.
        employer_id: String,
        /// Controller of the rejected assignment.
        controller_id: String,
        /// The store's description of the failure.
        message: String,
    },

    /// The store refused to commit the run's transaction; nothing was saved.
    #[error("Failed to commit {created} new assignments: {message}")]
    CommitFailed {
        /// Number of assignments the run had produced.
        created: usize,
        /// The store's description of the failure.
        message: String,
    },
}

/// A type alias for Results that return PlannerError.
pub type PlannerResult<T> = Result<T, PlannerError>;
