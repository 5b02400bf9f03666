//! Candidate ordering: the iteration order of employers, weeks, weekdays and
//! controllers.
//!
//! All randomness goes through an injected [`Rng`], so a run is fully
//! reproducible from its seed.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

use super::WorkloadTracker;
use crate::models::{Controller, Employer, WeekKey};

/// Orders employers for scheduling.
///
/// Employers are sorted by score, highest first, and cut into contiguous
/// chunks of `max(1, total_employers / weeks)`. `total_employers` counts every
/// employer of the run, including those already scheduled by an earlier run,
/// so a resumed run keeps the band width of the first one. Each chunk is
/// shuffled internally,
/// then the chunk order itself is shuffled and the chunks are flattened.
/// High scores keep a coarse preference without every same-score employer
/// landing in the same period of the year.
///
/// # Example
///
/// ```
/// use inspection_planner::models::Employer;
/// use inspection_planner::planning::order_employers;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let employers = vec![
///     Employer::new("emp_a", "ctr_1", 5),
///     Employer::new("emp_b", "ctr_1", 50),
/// ];
/// let refs: Vec<&Employer> = employers.iter().collect();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let ordered = order_employers(&refs, refs.len(), 10, &mut rng);
/// assert_eq!(ordered.len(), 2);
/// ```
pub fn order_employers<'a, R: Rng + ?Sized>(
    employers: &[&'a Employer],
    total_employers: usize,
    week_count: usize,
    rng: &mut R,
) -> Vec<&'a Employer> {
    let mut sorted = employers.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    let chunk_size = (total_employers / week_count.max(1)).max(1);
    let mut chunks: Vec<Vec<&'a Employer>> = Vec::new();
    for chunk in sorted.chunks(chunk_size) {
        let mut chunk = chunk.to_vec();
        chunk.shuffle(rng);
        chunks.push(chunk);
    }
    chunks.shuffle(rng);

    chunks.into_iter().flatten().collect()
}

/// The horizon's week keys in a random base order.
///
/// Every employer searches the weeks in its own freshly shuffled order, drawn
/// from this base list with [`WeekOrder::for_employer`].
#[derive(Debug, Clone)]
pub struct WeekOrder {
    weeks: Vec<WeekKey>,
}

impl WeekOrder {
    /// Deduplicates and shuffles the week keys once.
    pub fn shuffled<R: Rng + ?Sized>(mut weeks: Vec<WeekKey>, rng: &mut R) -> Self {
        weeks.sort();
        weeks.dedup();
        weeks.shuffle(rng);
        Self { weeks }
    }

    /// A new independent shuffle of the weeks for one employer.
    pub fn for_employer<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WeekKey> {
        let mut weeks = self.weeks.clone();
        weeks.shuffle(rng);
        weeks
    }

    /// The base order.
    pub fn weeks(&self) -> &[WeekKey] {
        &self.weeks
    }

    /// Number of distinct weeks.
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Returns true if the horizon has no week.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Orders the business days of one week, least-used weekday first.
///
/// Ties keep date order; `days` is expected in ascending date order.
pub fn order_weekdays(days: &[NaiveDate], tracker: &WorkloadTracker) -> Vec<NaiveDate> {
    let mut ordered = days.to_vec();
    ordered.sort_by_key(|day| tracker.weekday_load(day.weekday()));
    ordered
}

/// Orders a center's controllers, fewest assignments first.
///
/// Ties keep input order.
pub fn order_controllers<'a>(
    controllers: &[&'a Controller],
    tracker: &WorkloadTracker,
) -> Vec<&'a Controller> {
    let mut ordered = controllers.to_vec();
    ordered.sort_by_key(|controller| tracker.assignment_count(&controller.id));
    ordered
}
