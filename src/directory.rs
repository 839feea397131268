//! Reviewer directory: name → contact address.
//!
//! The directory only resolves how to reach a reviewer. Who may be assigned
//! is decided by the [`ReviewerPool`](crate::models::ReviewerPool); the two
//! are independent and a pool reviewer may be missing here.
//!
//! # Import format
//! One entry per line:
//! - `Name <address>`
//! - `Name, address` (last comma-separated part is the address)
//! - `address` alone (name = part before `@`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contact addresses by reviewer name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewerDirectory {
    entries: BTreeMap<String, String>,
}

impl ReviewerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the admin's free-text import. Unusable lines are skipped.
    ///
    /// ```
    /// use u_assign::directory::ReviewerDirectory;
    ///
    /// let dir = ReviewerDirectory::parse("Ada Lovelace <ada@example.org>\nGrace, grace@example.org");
    /// assert_eq!(dir.address_of("Ada Lovelace"), Some("ada@example.org"));
    /// assert_eq!(dir.address_of("Grace"), Some("grace@example.org"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut dir = Self::new();
        for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match parse_line(line) {
                Some((name, address)) => {
                    dir.insert(name, address);
                }
                None => tracing::debug!(line, "skipping directory line without an address"),
            }
        }
        dir
    }

    /// Adds or replaces an entry. Returns the previous address.
    pub fn insert(&mut self, name: impl Into<String>, address: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), address.into())
    }

    /// Removes an entry. Returns its address.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Contact address for a reviewer. Empty addresses count as absent.
    pub fn address_of(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .filter(|a| !a.trim().is_empty())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, address)` pairs ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a.as_str()))
    }
}

impl<N: Into<String>, A: Into<String>> FromIterator<(N, A)> for ReviewerDirectory {
    fn from_iter<T: IntoIterator<Item = (N, A)>>(iter: T) -> Self {
        let mut dir = Self::new();
        for (name, address) in iter {
            dir.insert(name, address);
        }
        dir
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    if let (Some(open), Some(close)) = (line.find('<'), line.rfind('>')) {
        if open < close {
            let address = line[open + 1..close].trim();
            if address.is_empty() {
                return None;
            }
            let rest = format!("{}{}", &line[..open], &line[close + 1..]);
            let name = rest.trim().trim_end_matches(',').trim();
            return Some((name_or_local_part(name, address), address.to_string()));
        }
    }

    let parts: Vec<&str> = line
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [] => None,
        [single] if single.contains('@') => {
            Some((name_or_local_part("", single), single.to_string()))
        }
        [_] => None,
        [names @ .., address] => Some((names.join(", "), address.to_string())),
    }
}

fn name_or_local_part(name: &str, address: &str) -> String {
    if name.is_empty() {
        address.split('@').next().unwrap_or(address).to_string()
    } else {
        name.to_string()
    }
}
