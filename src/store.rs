//! Ledger persistence seam.
//!
//! The crate owns no storage format. A [`LedgerStore`] is the storage
//! collaborator, keyed by dataset identity. [`assign_dataset`] and
//! [`clear_dataset`] run the load → mutate → save sequence while holding
//! `&mut` on the store, so nothing else can touch the store in between.

use std::collections::HashMap;

use crate::engine::{AssignmentOutcome, AutoAssigner};
use crate::error::Result;
use crate::models::{AssignmentLedger, ReviewerPool};

/// Storage collaborator for per-dataset ledgers.
pub trait LedgerStore {
    /// Loads a dataset's ledger. Unknown datasets yield an empty ledger.
    fn load(&self, dataset: &str) -> Result<AssignmentLedger>;

    /// Replaces a dataset's ledger.
    fn save(&mut self, dataset: &str, ledger: &AssignmentLedger) -> Result<()>;
}

/// In-memory [`LedgerStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    ledgers: HashMap<String, AssignmentLedger>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of datasets with a stored ledger.
    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    /// Whether no ledger is stored.
    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self, dataset: &str) -> Result<AssignmentLedger> {
        Ok(self.ledgers.get(dataset).cloned().unwrap_or_default())
    }

    fn save(&mut self, dataset: &str, ledger: &AssignmentLedger) -> Result<()> {
        self.ledgers.insert(dataset.to_string(), ledger.clone());
        Ok(())
    }
}

/// Loads `dataset`'s ledger, runs the assigner and saves the result.
///
/// A rejected run leaves the stored ledger untouched.
pub fn assign_dataset<L, S>(
    store: &mut L,
    dataset: &str,
    projects: &[S],
    pool: &ReviewerPool,
) -> Result<AssignmentOutcome>
where
    L: LedgerStore + ?Sized,
    S: AsRef<str>,
{
    let existing = store.load(dataset)?;
    let outcome = AutoAssigner::new().run_detailed(projects, pool, &existing)?;
    store.save(dataset, &outcome.ledger)?;
    tracing::info!(dataset, %outcome, "dataset ledger saved");
    Ok(outcome)
}

/// Clears `dataset`'s ledger and saves it. Other datasets are untouched.
pub fn clear_dataset<L>(store: &mut L, dataset: &str) -> Result<AssignmentLedger>
where
    L: LedgerStore + ?Sized,
{
    let mut ledger = store.load(dataset)?;
    ledger.clear();
    store.save(dataset, &ledger)?;
    tracing::info!(dataset, "dataset ledger cleared");
    Ok(ledger)
}
