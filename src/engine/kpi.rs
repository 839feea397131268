//! Assignment quality metrics (KPIs).
//!
//! Computes load-balance and coverage indicators for a ledger against the
//! pool and project list of a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Load spread | max(load) - min(load) over pool reviewers |
//! | Average load | Mean projects per pool reviewer |
//! | Coverage rate | Fraction of projects at target count |
//! | Missing slots | Sum of (target - assigned) over short projects |

use crate::models::{AssignmentLedger, ReviewerPool};

/// Assignment performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentKpi {
    /// Projects held per pool reviewer, in pool order.
    pub load_by_reviewer: Vec<(String, usize)>,
    /// Highest reviewer load.
    pub max_load: usize,
    /// Lowest reviewer load.
    pub min_load: usize,
    /// Mean reviewer load.
    pub avg_load: f64,
    /// Fraction of projects that reached the target (0.0..1.0).
    pub coverage_rate: f64,
    /// Projects below target.
    pub overflow_count: usize,
    /// Reviewer slots still unfilled across all projects.
    pub missing_slots: usize,
}

impl AssignmentKpi {
    /// Computes KPIs for `projects` in `ledger`.
    ///
    /// # Arguments
    /// * `ledger` - The ledger produced by a run.
    /// * `pool` - The pool the run used (load counting and target).
    /// * `projects` - The projects to evaluate coverage over.
    pub fn calculate<S: AsRef<str>>(
        ledger: &AssignmentLedger,
        pool: &ReviewerPool,
        projects: &[S],
    ) -> Self {
        let load_by_reviewer: Vec<(String, usize)> = pool
            .reviewers
            .iter()
            .map(|r| (r.clone(), ledger.load_of(r)))
            .collect();

        let max_load = load_by_reviewer.iter().map(|(_, l)| *l).max().unwrap_or(0);
        let min_load = load_by_reviewer.iter().map(|(_, l)| *l).min().unwrap_or(0);
        let avg_load = if load_by_reviewer.is_empty() {
            0.0
        } else {
            let sum: usize = load_by_reviewer.iter().map(|(_, l)| *l).sum();
            sum as f64 / load_by_reviewer.len() as f64
        };

        let target = pool.reviewer_count;
        let mut satisfied = 0;
        let mut overflow_count = 0;
        let mut missing_slots = 0;
        for project in projects {
            let assigned = ledger.reviewers_for(project.as_ref()).len();
            if assigned >= target {
                satisfied += 1;
            } else {
                overflow_count += 1;
                missing_slots += target - assigned;
            }
        }

        let coverage_rate = if projects.is_empty() {
            1.0
        } else {
            satisfied as f64 / projects.len() as f64
        };

        Self {
            load_by_reviewer,
            max_load,
            min_load,
            avg_load,
            coverage_rate,
            overflow_count,
            missing_slots,
        }
    }

    /// Difference between the most and least loaded reviewer.
    #[inline]
    pub fn load_spread(&self) -> usize {
        self.max_load - self.min_load
    }

    /// Whether no two reviewers differ by more than one project.
    pub fn is_balanced(&self) -> bool {
        self.load_spread() <= 1
    }

    /// Whether the assignment meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_spread: usize, min_coverage: f64) -> bool {
        self.load_spread() <= max_spread && self.coverage_rate >= min_coverage
    }
}
