//! Reviewer assignment domain models.
//!
//! Provides the plain data types the engine consumes and produces. None of
//! them perform I/O; persistence belongs to a [`LedgerStore`](crate::store::LedgerStore).
//!
//! # Domain Mappings
//!
//! | u-assign | Grant review | Conference | Code review |
//! |----------|--------------|------------|-------------|
//! | Project | Proposal | Paper | Pull request |
//! | Reviewer | Panelist | PC member | Maintainer |
//! | Ledger | Panel sheet | Assignment table | Review queue |

mod ledger;
mod pool;

pub use ledger::AssignmentLedger;
pub use pool::{PoolConfig, ReviewerLoad, ReviewerPool, DEFAULT_REVIEWER_COUNT};
