//! Greedy load-balancing reviewer assignment.
//!
//! # Algorithm
//!
//! 1. Seed a load counter per pool reviewer from the existing ledger.
//! 2. Walk projects in the order supplied.
//! 3. Carry forward projects already at or above the target count.
//! 4. Top up every other project by repeatedly picking the least-loaded
//!    pool reviewer not yet on it (ties: first in pool order), bumping
//!    that reviewer's load after each pick.
//! 5. Recompute overflow for every project in the ledger, requested or not.
//!
//! # Complexity
//! O(p * k * r) where p=projects, k=target count, r=pool size.

use std::fmt;

use crate::error::{AssignError, Result};
use crate::models::{AssignmentLedger, ReviewerLoad, ReviewerPool};
use crate::validation::validate_run_input;

/// Result of an assignment run with its bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentOutcome {
    /// The new ledger, ready to be persisted.
    pub ledger: AssignmentLedger,
    /// Projects left untouched because they were already satisfied.
    pub carried_forward: Vec<String>,
    /// Requested projects, in processing order.
    pub processed: Vec<String>,
    /// Reviewer picks made during this run.
    pub picks: usize,
    /// Final load per pool reviewer, in pool order.
    pub loads: Vec<(String, usize)>,
}

impl AssignmentOutcome {
    /// Projects in the ledger that are below target.
    pub fn overflow_count(&self) -> usize {
        self.ledger.overflow().len()
    }

    /// Whether every project in the ledger reached its target.
    pub fn is_complete(&self) -> bool {
        self.ledger.overflow().is_empty()
    }
}

impl fmt::Display for AssignmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "auto-assigned {} project(s) with {} pick(s)",
            self.processed.len(),
            self.picks
        )?;
        if !self.carried_forward.is_empty() {
            write!(f, "; {} already complete", self.carried_forward.len())?;
        }
        if !self.is_complete() {
            write!(f, "; {} overflow", self.overflow_count())?;
        }
        Ok(())
    }
}

/// Deterministic greedy reviewer assigner.
///
/// # Example
///
/// ```
/// use u_assign::engine::AutoAssigner;
/// use u_assign::models::{AssignmentLedger, ReviewerPool};
///
/// let pool = ReviewerPool::new(["Alice", "Bob"]).with_reviewer_count(2);
/// let ledger = AutoAssigner::new()
///     .run(&["P1", "P2"], &pool, &AssignmentLedger::new())
///     .unwrap();
///
/// assert_eq!(ledger.reviewers_for("P1"), ["Alice", "Bob"]);
/// assert!(ledger.overflow().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoAssigner;

impl AutoAssigner {
    /// Creates an assigner.
    pub fn new() -> Self {
        Self
    }

    /// Assigns reviewers to `projects` and returns the new ledger.
    ///
    /// `existing` is not modified.
    ///
    /// # Errors
    /// [`AssignError::Configuration`] if project keys repeat or are blank,
    /// or if the pool's target count is zero.
    pub fn run<S: AsRef<str>>(
        &self,
        projects: &[S],
        pool: &ReviewerPool,
        existing: &AssignmentLedger,
    ) -> Result<AssignmentLedger> {
        self.run_detailed(projects, pool, existing)
            .map(|outcome| outcome.ledger)
    }

    /// Like [`run`](Self::run), also returning run bookkeeping.
    pub fn run_detailed<S: AsRef<str>>(
        &self,
        projects: &[S],
        pool: &ReviewerPool,
        existing: &AssignmentLedger,
    ) -> Result<AssignmentOutcome> {
        let projects: Vec<String> = projects.iter().map(|p| p.as_ref().to_string()).collect();
        validate_run_input(&projects, pool).map_err(AssignError::Configuration)?;

        let target = pool.reviewer_count;
        let mut ledger = existing.clone();
        ledger.set_reviewer_count(target);

        let mut load = ReviewerLoad::new(pool);
        for reviewers in existing.assignments().values() {
            for reviewer in reviewers {
                load.record(reviewer);
            }
        }

        let mut carried_forward = Vec::new();
        let mut picks = 0;

        for project in &projects {
            let mut reviewers = existing.reviewers_for(project).to_vec();
            if reviewers.len() >= target {
                carried_forward.push(project.clone());
                ledger.set_reviewers(project, reviewers);
                continue;
            }

            while reviewers.len() < target {
                let Some(pick) = load.least_loaded(&reviewers).map(str::to_string) else {
                    break;
                };
                load.record(&pick);
                tracing::debug!(project = %project, reviewer = %pick, "reviewer picked");
                reviewers.push(pick);
                picks += 1;
            }

            if reviewers.len() < target {
                tracing::warn!(
                    project = %project,
                    assigned = reviewers.len(),
                    target_count = target,
                    "project below target reviewer count"
                );
            }
            ledger.set_reviewers(project, reviewers);
        }

        // The target may have changed since the ledger was stored.
        ledger.refresh_all_overflow();

        tracing::info!(
            projects = projects.len(),
            carried_forward = carried_forward.len(),
            picks,
            overflow = ledger.overflow().len(),
            "auto-assignment complete"
        );

        Ok(AssignmentOutcome {
            ledger,
            carried_forward,
            processed: projects,
            picks,
            loads: load.snapshot(),
        })
    }
}
