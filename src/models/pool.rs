//! Reviewer pool model.
//!
//! The pool is the admin-configured set of reviewers eligible for
//! auto-assignment, together with the target number of reviewers per
//! project and the candidate meeting dates projects may be grouped under.
//!
//! # Normalization
//! - Reviewer names are case-sensitive, trimmed, de-duplicated (first
//!   occurrence wins) and blank names are dropped.
//! - Meeting dates are de-duplicated in the same way.
//! - A target count below 1 is clamped to 1.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Target reviewers per project when the admin has not set one.
pub const DEFAULT_REVIEWER_COUNT: usize = 2;

/// Raw auto-assign settings as stored by the admin configuration screen.
///
/// All fields are optional on input. `reviewer_count` is signed so that
/// out-of-range admin input is clamped by [`ReviewerPool::from_config`]
/// instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoolConfig {
    /// Eligible reviewer names, in admin order.
    pub reviewer_pool: Vec<String>,
    /// Target reviewers per project.
    pub reviewer_count: i64,
    /// Candidate meeting date labels.
    pub meeting_dates: Vec<String>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            reviewer_pool: Vec::new(),
            reviewer_count: DEFAULT_REVIEWER_COUNT as i64,
            meeting_dates: Vec::new(),
        }
    }
}

/// The normalized reviewer pool used by the engine.
///
/// Fields are public for inspection; prefer the constructors and `with_*`
/// builders, which keep the normalization rules. A pool whose
/// `reviewer_count` was forced to 0 is rejected by input validation.
/// Stored pools load through [`PoolConfig`] and [`ReviewerPool::from_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerPool {
    /// Eligible reviewers. Order is the load tie-breaker.
    pub reviewers: Vec<String>,
    /// Target reviewers per project.
    pub reviewer_count: usize,
    /// Candidate meeting dates (informational grouping only).
    pub meeting_dates: Vec<String>,
}

impl Default for ReviewerPool {
    fn default() -> Self {
        Self {
            reviewers: Vec::new(),
            reviewer_count: DEFAULT_REVIEWER_COUNT,
            meeting_dates: Vec::new(),
        }
    }
}

impl ReviewerPool {
    /// Creates a pool from reviewer names with the default target count.
    pub fn new<I, S>(reviewers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reviewers: dedup_labels(reviewers),
            ..Self::default()
        }
    }

    /// Normalizes raw admin settings into a pool.
    pub fn from_config(config: &PoolConfig) -> Self {
        let reviewer_count = clamp_count(config.reviewer_count);
        Self {
            reviewers: dedup_labels(config.reviewer_pool.iter().cloned()),
            reviewer_count,
            meeting_dates: dedup_labels(config.meeting_dates.iter().cloned()),
        }
    }

    /// Sets the target reviewers per project (clamped to at least 1).
    pub fn with_reviewer_count(mut self, count: i64) -> Self {
        self.reviewer_count = clamp_count(count);
        self
    }

    /// Sets the candidate meeting dates.
    pub fn with_meeting_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meeting_dates = dedup_labels(dates);
        self
    }

    /// Converts back to the raw admin form.
    pub fn to_config(&self) -> PoolConfig {
        PoolConfig {
            reviewer_pool: self.reviewers.clone(),
            reviewer_count: self.reviewer_count as i64,
            meeting_dates: self.meeting_dates.clone(),
        }
    }

    /// Number of eligible reviewers.
    #[inline]
    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    /// Whether no reviewer is eligible.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }

    /// Whether `name` is an eligible reviewer (exact, case-sensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.reviewers.iter().any(|r| r == name)
    }

    /// Position of a reviewer in pool order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.reviewers.iter().position(|r| r == name)
    }

    /// Whether `date` is one of the configured meeting dates.
    pub fn has_meeting_date(&self, date: &str) -> bool {
        self.meeting_dates.iter().any(|d| d == date)
    }
}

/// Per-run load counters for the reviewers of one pool.
///
/// Counters are indexed in pool order; names outside the pool are ignored.
#[derive(Debug, Clone)]
pub struct ReviewerLoad {
    names: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<usize>,
}

impl ReviewerLoad {
    /// Creates zeroed counters for every reviewer in `pool`.
    ///
    /// A name listed twice gets a single counter at its first position.
    pub fn new(pool: &ReviewerPool) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(pool.reviewers.len());
        let mut index = HashMap::with_capacity(pool.reviewers.len());
        for name in &pool.reviewers {
            if !index.contains_key(name) {
                index.insert(name.clone(), names.len());
                names.push(name.clone());
            }
        }
        let counts = vec![0; names.len()];
        Self {
            names,
            index,
            counts,
        }
    }

    /// Adds one project to a reviewer's load. Returns `false` if the
    /// reviewer is not in the pool.
    pub fn record(&mut self, name: &str) -> bool {
        match self.index.get(name) {
            Some(&i) => {
                self.counts[i] += 1;
                true
            }
            None => false,
        }
    }

    /// Projects assigned to `name` so far in this run.
    ///
    /// Returns `None` for reviewers outside the pool.
    pub fn load_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|&i| self.counts[i])
    }

    /// Picks the least-loaded reviewer not in `exclude`.
    ///
    /// Ties go to the reviewer listed first in the pool.
    pub fn least_loaded<'a>(&'a self, exclude: &[String]) -> Option<&'a str> {
        self.names
            .iter()
            .zip(&self.counts)
            .filter(|(name, _)| !exclude.contains(name))
            .min_by_key(|&(_, &count)| count)
            .map(|(name, _)| name.as_str())
    }

    /// `(reviewer, load)` pairs in pool order.
    pub fn snapshot(&self) -> Vec<(String, usize)> {
        self.names.iter().cloned().zip(self.counts.iter().copied()).collect()
    }
}

fn clamp_count(count: i64) -> usize {
    if count < 1 {
        tracing::warn!(requested = count, "reviewer count below 1, clamping to 1");
        1
    } else {
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

fn dedup_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for label in labels {
        let label: String = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }
    out
}
