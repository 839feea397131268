//! Reminder dispatch.
//!
//! Builds one reminder per assigned reviewer listing all of that reviewer's
//! projects. Delivery belongs to a notification collaborator; this module
//! only produces the entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::directory::ReviewerDirectory;
use crate::models::AssignmentLedger;

/// A reminder for one reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Reviewer name.
    pub reviewer: String,
    /// Contact address, `None` when the directory has no entry.
    pub address: Option<String>,
    /// Assigned project keys, ordered.
    pub projects: Vec<String>,
}

impl Reminder {
    /// Whether a notification collaborator can reach this reviewer.
    pub fn is_reachable(&self) -> bool {
        self.address.is_some()
    }

    /// Plain-text message body listing the reviewer's projects.
    pub fn message(&self) -> String {
        let mut body = format!(
            "Hi {},\n\nYou are assigned to review {} project(s):\n",
            self.reviewer,
            self.projects.len()
        );
        for project in &self.projects {
            body.push_str("  - ");
            body.push_str(project);
            body.push('\n');
        }
        body.push_str("\nPlease submit your review survey for each project.\n");
        body
    }
}

/// Builds one reminder per reviewer present in `ledger`.
///
/// Reviewers without a directory address are kept with `address: None`.
/// Output is ordered by reviewer name.
///
/// ```
/// use u_assign::directory::ReviewerDirectory;
/// use u_assign::models::AssignmentLedger;
/// use u_assign::reminder::build_reminders;
///
/// let mut ledger = AssignmentLedger::new();
/// ledger.manual_assign("P1", "Alice");
/// ledger.manual_assign("P2", "Alice");
/// let dir = ReviewerDirectory::parse("Alice <alice@example.org>");
///
/// let reminders = build_reminders(&ledger, &dir);
/// assert_eq!(reminders.len(), 1);
/// assert_eq!(reminders[0].projects, ["P1", "P2"]);
/// ```
pub fn build_reminders(ledger: &AssignmentLedger, directory: &ReviewerDirectory) -> Vec<Reminder> {
    let mut by_reviewer: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (project, reviewers) in ledger.assignments() {
        for reviewer in reviewers {
            by_reviewer
                .entry(reviewer.as_str())
                .or_default()
                .push(project.clone());
        }
    }

    let reminders: Vec<Reminder> = by_reviewer
        .into_iter()
        .map(|(reviewer, projects)| Reminder {
            reviewer: reviewer.to_string(),
            address: directory.address_of(reviewer).map(str::to_string),
            projects,
        })
        .collect();

    let missing = unreachable(&reminders).len();
    if missing > 0 {
        tracing::warn!(missing, "reviewers without a contact address");
    }
    reminders
}

/// Reviewers in `reminders` that have no contact address.
pub fn unreachable(reminders: &[Reminder]) -> Vec<&str> {
    reminders
        .iter()
        .filter(|r| !r.is_reachable())
        .map(|r| r.reviewer.as_str())
        .collect()
}
