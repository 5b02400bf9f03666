//! Employer and center models.

use serde::{Deserialize, Serialize};

/// Administrative grouping of controllers and employers.
///
/// An employer can only be inspected by a controller of its own center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Center {
    /// Unique identifier for the center.
    pub id: String,
    /// Display name of the center.
    #[serde(default)]
    pub name: String,
}

impl Center {
    /// Creates a center.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Represents an employer awaiting an inspection.
///
/// Employers with a higher `score` are preferred when the year is filled, but
/// only coarsely: see [`order_employers`](crate::planning::order_employers).
///
/// # Example
///
/// ```
/// use inspection_planner::models::Employer;
///
/// let employer = Employer::new("emp_001", "ctr_north", 80);
/// assert_eq!(employer.score, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// Unique identifier for the employer.
    pub id: String,
    /// The center responsible for this employer.
    pub center_id: String,
    /// Priority score; higher is scheduled preferentially.
    #[serde(default)]
    pub score: i64,
}

impl Employer {
    /// Creates an employer.
    pub fn new(id: impl Into<String>, center_id: impl Into<String>, score: i64) -> Self {
        Self {
            id: id.into(),
            center_id: center_id.into(),
            score,
        }
    }
}
