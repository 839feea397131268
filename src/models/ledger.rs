//! Assignment ledger model.
//!
//! The ledger is the per-dataset record of which reviewers are assigned to
//! which project, plus the overflow set: projects that did not reach the
//! target reviewer count.
//!
//! # Invariants
//! - A project never lists the same reviewer twice.
//! - Projects with no reviewers have no `assignments` entry.
//! - Whenever a project is edited by hand, and for every project after an
//!   engine run, overflow membership is recomputed from the reviewer list:
//!   `project ∈ overflow ⟺ |reviewers| < reviewer_count`.
//!
//! # Serialized form
//! `{"assignments": {..}, "overflow": [..], "reviewerCount": n, "meetings": {..}}`.
//! Only `assignments` and `overflow` are required, so older payloads that
//! carry just those two fields still load. Loaded payloads are normalized:
//! duplicate reviewers are dropped, a target below 1 becomes 1 and overflow
//! is recomputed for every project.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::pool::{ReviewerPool, DEFAULT_REVIEWER_COUNT};
use crate::error::{AssignError, Result};

/// Project → reviewer assignments and overflow set for one dataset.
///
/// Ordered collections keep serialization byte-stable for equal ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LedgerPayload")]
pub struct AssignmentLedger {
    assignments: BTreeMap<String, Vec<String>>,
    overflow: BTreeSet<String>,
    reviewer_count: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    meetings: BTreeMap<String, String>,
}

/// Stored ledger as read from a storage collaborator, before normalization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerPayload {
    #[serde(default)]
    assignments: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    overflow: BTreeSet<String>,
    #[serde(default = "default_reviewer_count")]
    reviewer_count: usize,
    #[serde(default)]
    meetings: BTreeMap<String, String>,
}

fn default_reviewer_count() -> usize {
    DEFAULT_REVIEWER_COUNT
}

impl From<LedgerPayload> for AssignmentLedger {
    fn from(payload: LedgerPayload) -> Self {
        let assignments = payload
            .assignments
            .into_iter()
            .filter_map(|(project, reviewers)| {
                let mut unique: Vec<String> = Vec::with_capacity(reviewers.len());
                for reviewer in reviewers {
                    if !unique.contains(&reviewer) {
                        unique.push(reviewer);
                    }
                }
                (!unique.is_empty()).then_some((project, unique))
            })
            .collect();

        let mut ledger = Self {
            assignments,
            overflow: payload.overflow,
            reviewer_count: payload.reviewer_count.max(1),
            meetings: payload.meetings,
        };
        ledger.refresh_all_overflow();
        ledger
    }
}

impl Default for AssignmentLedger {
    fn default() -> Self {
        Self {
            assignments: BTreeMap::new(),
            overflow: BTreeSet::new(),
            reviewer_count: DEFAULT_REVIEWER_COUNT,
            meetings: BTreeMap::new(),
        }
    }
}

impl AssignmentLedger {
    /// Creates an empty ledger with the default target count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target count used to evaluate overflow on manual edits.
    ///
    /// Does not re-evaluate existing projects; the next engine run or edit
    /// of a project does.
    pub fn with_reviewer_count(mut self, count: usize) -> Self {
        self.reviewer_count = count.max(1);
        self
    }

    /// Target reviewers per project this ledger is evaluated against.
    #[inline]
    pub fn reviewer_count(&self) -> usize {
        self.reviewer_count
    }

    /// All assignments, ordered by project key.
    pub fn assignments(&self) -> &BTreeMap<String, Vec<String>> {
        &self.assignments
    }

    /// Projects below their target count.
    pub fn overflow(&self) -> &BTreeSet<String> {
        &self.overflow
    }

    /// Meeting date labels by project.
    pub fn meetings(&self) -> &BTreeMap<String, String> {
        &self.meetings
    }

    /// Reviewers assigned to a project, in assignment order.
    pub fn reviewers_for(&self, project: &str) -> &[String] {
        self.assignments
            .get(project)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Projects a reviewer is assigned to, ordered by key.
    pub fn projects_for(&self, reviewer: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, reviewers)| reviewers.iter().any(|r| r == reviewer))
            .map(|(project, _)| project.as_str())
            .collect()
    }

    /// Number of projects a reviewer holds in this ledger.
    pub fn load_of(&self, reviewer: &str) -> usize {
        self.assignments
            .values()
            .filter(|reviewers| reviewers.iter().any(|r| r == reviewer))
            .count()
    }

    /// Whether a project has reached the target count.
    pub fn is_satisfied(&self, project: &str) -> bool {
        self.reviewers_for(project).len() >= self.reviewer_count
    }

    /// Whether a project is in the overflow set.
    pub fn is_overflow(&self, project: &str) -> bool {
        self.overflow.contains(project)
    }

    /// Number of projects with at least one reviewer.
    pub fn project_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the ledger holds no assignments and no overflow.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.overflow.is_empty()
    }

    /// Meeting date a project is grouped under.
    pub fn meeting_for(&self, project: &str) -> Option<&str> {
        self.meetings.get(project).map(String::as_str)
    }

    /// Removes every assignment, overflow entry and meeting tag.
    pub fn clear(&mut self) {
        self.assignments.clear();
        self.overflow.clear();
        self.meetings.clear();
    }

    /// Adds a reviewer to a project by hand.
    ///
    /// Pool membership is not checked. Returns `false` if the reviewer was
    /// already assigned.
    pub fn manual_assign(&mut self, project: &str, reviewer: &str) -> bool {
        let reviewers = self.assignments.entry(project.to_string()).or_default();
        if reviewers.iter().any(|r| r == reviewer) {
            return false;
        }
        reviewers.push(reviewer.to_string());
        self.refresh_overflow(project);
        true
    }

    /// Removes a reviewer from a project by hand.
    ///
    /// Returns `false` if the reviewer was not assigned.
    pub fn manual_unassign(&mut self, project: &str, reviewer: &str) -> bool {
        let Some(reviewers) = self.assignments.get_mut(project) else {
            return false;
        };
        let before = reviewers.len();
        reviewers.retain(|r| r != reviewer);
        if reviewers.len() == before {
            return false;
        }
        if reviewers.is_empty() {
            self.assignments.remove(project);
        }
        self.refresh_overflow(project);
        true
    }

    /// Groups a project under one of the pool's meeting dates.
    ///
    /// # Errors
    /// [`AssignError::UnknownMeetingDate`] if `date` is not configured.
    pub fn tag_meeting(&mut self, project: &str, date: &str, pool: &ReviewerPool) -> Result<()> {
        if !pool.has_meeting_date(date) {
            return Err(AssignError::UnknownMeetingDate {
                project: project.to_string(),
                date: date.to_string(),
            });
        }
        self.meetings.insert(project.to_string(), date.to_string());
        Ok(())
    }

    /// Removes a project's meeting tag. Returns the previous date.
    pub fn untag_meeting(&mut self, project: &str) -> Option<String> {
        self.meetings.remove(project)
    }

    pub(crate) fn set_reviewer_count(&mut self, count: usize) {
        self.reviewer_count = count;
    }

    /// Replaces a project's reviewers and recomputes its overflow state.
    pub(crate) fn set_reviewers(&mut self, project: &str, reviewers: Vec<String>) {
        if reviewers.is_empty() {
            self.assignments.remove(project);
        } else {
            self.assignments.insert(project.to_string(), reviewers);
        }
        self.refresh_overflow(project);
    }

    /// Recomputes overflow membership for every known project.
    pub(crate) fn refresh_all_overflow(&mut self) {
        let projects: Vec<String> = self
            .assignments
            .keys()
            .chain(self.overflow.iter())
            .cloned()
            .collect();
        for project in projects {
            self.refresh_overflow(&project);
        }
    }

    fn refresh_overflow(&mut self, project: &str) {
        if self.is_satisfied(project) {
            self.overflow.remove(project);
        } else {
            self.overflow.insert(project.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> AssignmentLedger {
        let mut l = AssignmentLedger::new();
        l.manual_assign("P1", "Alice");
        l.manual_assign("P1", "Bob");
        l.manual_assign("P2", "Alice");
        l
    }

    #[test]
    fn test_manual_assign_recomputes_overflow() {
        let l = sample_ledger();
        assert!(l.is_satisfied("P1"));
        assert!(!l.is_overflow("P1"));
        assert!(!l.is_satisfied("P2"));
        assert!(l.is_overflow("P2"));
    }

    #[test]
    fn test_manual_assign_rejects_duplicate() {
        let mut l = sample_ledger();
        assert!(!l.manual_assign("P1", "Alice"));
        assert_eq!(l.reviewers_for("P1"), ["Alice", "Bob"]);
    }

    #[test]
    fn test_manual_unassign() {
        let mut l = sample_ledger();
        assert!(l.manual_unassign("P1", "Bob"));
        assert_eq!(l.reviewers_for("P1"), ["Alice"]);
        assert!(l.is_overflow("P1"));

        assert!(!l.manual_unassign("P1", "Bob"));
        assert!(!l.manual_unassign("P9", "Bob"));
    }

    #[test]
    fn test_unassign_last_reviewer_drops_entry() {
        let mut l = sample_ledger();
        assert!(l.manual_unassign("P2", "Alice"));
        assert!(l.reviewers_for("P2").is_empty());
        assert!(!l.assignments().contains_key("P2"));
        // Still below target.
        assert!(l.is_overflow("P2"));
    }

    #[test]
    fn test_queries() {
        let l = sample_ledger();
        assert_eq!(l.projects_for("Alice"), vec!["P1", "P2"]);
        assert_eq!(l.projects_for("Bob"), vec!["P1"]);
        assert_eq!(l.load_of("Alice"), 2);
        assert_eq!(l.load_of("Nobody"), 0);
        assert_eq!(l.project_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut l = sample_ledger();
        let pool = ReviewerPool::new(["Alice"]).with_meeting_dates(["May 3"]);
        l.tag_meeting("P1", "May 3", &pool).unwrap();
        l.clear();
        assert!(l.assignments().is_empty());
        assert!(l.overflow().is_empty());
        assert!(l.meetings().is_empty());
        assert!(l.is_empty());
    }

    #[test]
    fn test_tag_meeting() {
        let mut l = sample_ledger();
        let pool = ReviewerPool::new(["Alice"]).with_meeting_dates(["May 3", "May 10"]);
        l.tag_meeting("P1", "May 10", &pool).unwrap();
        assert_eq!(l.meeting_for("P1"), Some("May 10"));

        let err = l.tag_meeting("P2", "June 1", &pool).unwrap_err();
        assert!(matches!(err, AssignError::UnknownMeetingDate { .. }));
        assert_eq!(l.meeting_for("P2"), None);

        assert_eq!(l.untag_meeting("P1").as_deref(), Some("May 10"));
        assert_eq!(l.meeting_for("P1"), None);
    }

    #[test]
    fn test_target_count_on_manual_edit() {
        let mut l = AssignmentLedger::new().with_reviewer_count(1);
        l.manual_assign("P1", "Alice");
        assert!(!l.is_overflow("P1"));
    }

    #[test]
    fn test_legacy_payload_loads() {
        let json = r#"{"assignments":{"P1":["Alice","Bob"],"P2":["Carol"]},"overflow":["P2"]}"#;
        let l: AssignmentLedger = serde_json::from_str(json).unwrap();
        assert_eq!(l.reviewer_count(), DEFAULT_REVIEWER_COUNT);
        assert_eq!(l.reviewers_for("P1"), ["Alice", "Bob"]);
        assert!(l.is_overflow("P2"));
        assert!(l.meetings().is_empty());
    }

    #[test]
    fn test_loaded_payload_drops_duplicate_reviewers() {
        let json = r#"{"assignments":{"P1":["Alice","Alice"],"P2":[]},"overflow":[]}"#;
        let l: AssignmentLedger = serde_json::from_str(json).unwrap();
        assert_eq!(l.reviewers_for("P1"), ["Alice"]);
        assert!(l.is_overflow("P1"));
        assert!(!l.assignments().contains_key("P2"));
    }

    #[test]
    fn test_loaded_payload_recomputes_stale_overflow() {
        let json = r#"{"assignments":{"P1":["Alice","Bob"],"P2":["Carol"]},"overflow":["P1","P9"]}"#;
        let l: AssignmentLedger = serde_json::from_str(json).unwrap();
        assert!(!l.is_overflow("P1"));
        assert!(l.is_overflow("P2"));
        // No reviewers at all, still below target.
        assert!(l.is_overflow("P9"));
    }

    #[test]
    fn test_loaded_zero_reviewer_count_clamped() {
        let json = r#"{"assignments":{"P1":["Alice"]},"overflow":[],"reviewerCount":0}"#;
        let l: AssignmentLedger = serde_json::from_str(json).unwrap();
        assert_eq!(l.reviewer_count(), 1);
        assert!(l.is_satisfied("P1"));
        assert!(!l.is_satisfied("P2"));
    }

    #[test]
    fn test_serialized_shape() {
        let l = sample_ledger();
        let value = serde_json::to_value(&l).unwrap();
        assert_eq!(value["assignments"]["P1"][1], "Bob");
        assert_eq!(value["overflow"][0], "P2");
        assert_eq!(value["reviewerCount"], 2);
        assert!(value.get("meetings").is_none());
    }
}
