//! Reviewer auto-assignment for review-management workflows.
//!
//! Given the projects awaiting review, a pool of eligible reviewers and a
//! target number of reviewers per project, produces a balanced,
//! duplicate-free assignment ledger. Projects that cannot reach the target
//! are recorded in the ledger's overflow set instead of failing the run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ReviewerPool`, `PoolConfig`,
//!   `ReviewerLoad`, `AssignmentLedger`
//! - **`engine`**: The greedy `AutoAssigner` and `AssignmentKpi`
//! - **`validation`**: Run input checks (duplicate keys, target count)
//! - **`directory`**: Reviewer contact addresses and the admin import format
//! - **`reminder`**: One reminder per reviewer, built from a ledger
//! - **`tracker`**: Read-only filtered projection of a ledger
//! - **`store`**: The per-dataset storage seam and load → run → save helper
//!
//! # Architecture
//!
//! Everything except `store` is pure and synchronous. The ledger is an
//! explicit value passed into and returned from the engine; the caller owns
//! persistence and must serialize runs per dataset.

pub mod directory;
pub mod engine;
pub mod error;
pub mod models;
pub mod reminder;
pub mod store;
pub mod tracker;
pub mod validation;

pub use error::{AssignError, Result};
