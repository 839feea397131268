//! Reviewer auto-assignment and assignment KPIs.
//!
//! # Algorithm
//!
//! `AutoAssigner` is a deterministic single-pass greedy allocator: projects
//! are visited in the supplied order and each open reviewer slot goes to the
//! least-loaded eligible pool reviewer, ties broken by pool order. It is not
//! optimal for arbitrary seeded ledgers, but from an empty ledger it keeps
//! every reviewer within one project of every other.
//!
//! # KPI
//!
//! `AssignmentKpi` summarizes load spread and project coverage for admin
//! feedback after a run.

mod auto;
mod kpi;

pub use auto::{AssignmentOutcome, AutoAssigner};
pub use kpi::AssignmentKpi;
