//! Persistence seam for assignments.
//!
//! The planner reads previously committed assignments once, then writes the
//! new ones of a run inside a single transaction: either every assignment of
//! the run is committed or none is.

use thiserror::Error;

use crate::models::Assignment;

/// Errors reported by an [`AssignmentStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The employer already holds an assignment.
    #[error("employer '{employer_id}' already has an assignment")]
    DuplicateEmployer {
        /// The employer that was inserted twice.
        employer_id: String,
    },

    /// A write was attempted outside a transaction.
    #[error("no open transaction")]
    NoTransaction,

    /// A transaction was opened while another one is still open.
    #[error("a transaction is already open")]
    TransactionOpen,

    /// Any backend-specific failure.
    #[error("{0}")]
    Backend(String),
}

/// Storage of committed assignments.
pub trait AssignmentStore {
    /// Every committed assignment.
    fn load_assignments(&self) -> Result<Vec<Assignment>, StoreError>;

    /// Opens the run's transaction.
    fn begin(&mut self) -> Result<(), StoreError>;

    /// Adds one assignment to the open transaction.
    fn insert(&mut self, assignment: &Assignment) -> Result<(), StoreError>;

    /// Makes the open transaction's assignments permanent.
    fn commit(&mut self) -> Result<(), StoreError>;

    /// Discards the open transaction's assignments, leaving earlier ones.
    fn rollback(&mut self);
}

/// In-memory store enforcing one assignment per employer.
///
/// # Example
///
/// ```
/// use inspection_planner::models::Assignment;
/// use inspection_planner::store::{AssignmentStore, InMemoryStore};
/// use chrono::NaiveDate;
///
/// let mut store = InMemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
///
/// store.begin().unwrap();
/// store.insert(&Assignment::new("ctl_1", "emp_1", date)).unwrap();
/// store.rollback();
///
/// assert!(store.load_assignments().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    committed: Vec<Assignment>,
    pending: Option<Vec<Assignment>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding already committed assignments.
    pub fn with_assignments(assignments: Vec<Assignment>) -> Self {
        Self {
            committed: assignments,
            pending: None,
        }
    }

    /// Committed assignments.
    pub fn assignments(&self) -> &[Assignment] {
        &self.committed
    }

    /// Returns true while a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.pending.is_some()
    }

    fn holds_employer(&self, employer_id: &str) -> bool {
        self.committed
            .iter()
            .chain(self.pending.iter().flatten())
            .any(|a| a.employer_id == employer_id)
    }
}

impl AssignmentStore for InMemoryStore {
    fn load_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        Ok(self.committed.clone())
    }

    fn begin(&mut self) -> Result<(), StoreError> {
        if self.pending.is_some() {
            return Err(StoreError::TransactionOpen);
        }
        self.pending = Some(Vec::new());
        Ok(())
    }

    fn insert(&mut self, assignment: &Assignment) -> Result<(), StoreError> {
        if self.pending.is_none() {
            return Err(StoreError::NoTransaction);
        }
        if self.holds_employer(&assignment.employer_id) {
            return Err(StoreError::DuplicateEmployer {
                employer_id: assignment.employer_id.clone(),
            });
        }
        if let Some(pending) = self.pending.as_mut() {
            pending.push(assignment.clone());
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let pending = self.pending.take().ok_or(StoreError::NoTransaction)?;
        self.committed.extend(pending);
        Ok(())
    }

    fn rollback(&mut self) {
        self.pending = None;
    }
}
