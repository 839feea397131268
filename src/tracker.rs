//! Tracker view model.
//!
//! A read-only projection of a ledger for the assignment tracker screen,
//! filtered by an assignee query.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::AssignmentLedger;

/// One tracker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerRow {
    /// Project key.
    pub project: String,
    /// Assigned reviewers, in assignment order.
    pub reviewers: Vec<String>,
    /// Whether the project is below its target count.
    pub overflow: bool,
    /// Meeting date the project is grouped under.
    pub meeting_date: Option<String>,
}

/// Filtered view over a ledger.
///
/// ```
/// use u_assign::models::AssignmentLedger;
/// use u_assign::tracker::TrackerView;
///
/// let mut ledger = AssignmentLedger::new();
/// ledger.manual_assign("P1", "Alice");
/// ledger.manual_assign("P2", "Bob");
///
/// let rows = TrackerView::new(&ledger).with_query("ali").rows();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].project, "P1");
/// ```
#[derive(Debug, Clone)]
pub struct TrackerView<'a> {
    ledger: &'a AssignmentLedger,
    query: String,
}

impl<'a> TrackerView<'a> {
    /// Creates an unfiltered view.
    pub fn new(ledger: &'a AssignmentLedger) -> Self {
        Self {
            ledger,
            query: String::new(),
        }
    }

    /// Sets the assignee query (case-insensitive substring).
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.trim().to_lowercase();
        self
    }

    /// Whether a query is active.
    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    /// Rows ordered by project key.
    ///
    /// Unfiltered, overflow projects without any reviewer are included.
    /// Filtered, only projects with a matching reviewer are.
    pub fn rows(&self) -> Vec<TrackerRow> {
        let mut rows: BTreeMap<&str, TrackerRow> = self
            .ledger
            .assignments()
            .iter()
            .filter(|(_, reviewers)| self.matches(reviewers))
            .map(|(project, reviewers)| (project.as_str(), self.row(project, reviewers.clone())))
            .collect();

        if !self.is_filtered() {
            for project in self.ledger.overflow() {
                rows.entry(project.as_str())
                    .or_insert_with(|| self.row(project, Vec::new()));
            }
        }

        rows.into_values().collect()
    }

    /// Rows grouped by meeting date; untagged rows under `None`.
    pub fn by_meeting_date(&self) -> BTreeMap<Option<String>, Vec<TrackerRow>> {
        let mut groups: BTreeMap<Option<String>, Vec<TrackerRow>> = BTreeMap::new();
        for row in self.rows() {
            groups.entry(row.meeting_date.clone()).or_default().push(row);
        }
        groups
    }

    fn matches(&self, reviewers: &[String]) -> bool {
        !self.is_filtered()
            || reviewers
                .iter()
                .any(|r| r.to_lowercase().contains(&self.query))
    }

    fn row(&self, project: &str, reviewers: Vec<String>) -> TrackerRow {
        TrackerRow {
            project: project.to_string(),
            reviewers,
            overflow: self.ledger.is_overflow(project),
            meeting_date: self.ledger.meeting_for(project).map(str::to_string),
        }
    }
}
