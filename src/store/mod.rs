//! Persistence layer for the Attendance Engine.
//!
//! Provides:
//! - Policy store (one policy per company, default fallback)
//! - Attendance ledger (one record per employee-day, append plus checkout)
//! - Roster (read-only employee lookup)
//! - JSON snapshot persistence for the ledger

mod memory;
mod snapshot;
mod traits;

pub use memory::{InMemoryLedger, InMemoryPolicyStore, InMemoryRoster};
pub use snapshot::{LedgerSnapshot, SnapshotFile};
pub use traits::{AttendanceLedger, PolicyStore, Roster};

use std::sync::PoisonError;

use crate::error::EngineError;

impl<T> From<PoisonError<T>> for EngineError {
    fn from(_: PoisonError<T>) -> Self {
        EngineError::storage("store lock poisoned by a panicked writer")
    }
}
