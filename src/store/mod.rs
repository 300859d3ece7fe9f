//! Persistence contract for the aggregate inventory state.
//!
//! The engine itself never touches storage: adapters load the state once at
//! startup, hand it to the engine, and save the full snapshot after every
//! mutating operation. The contract is wholesale - there is no incremental
//! persistence - which keeps the store trivially consistent with the
//! in-memory state.

pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::core::InventoryState;
use crate::errors::Result;

/// Load/save contract between the engine's owner and a storage backend.
#[allow(async_fn_in_trait)]
pub trait StateStore {
    /// Loads the persisted state, or the empty default state when nothing
    /// was persisted yet or the read fails. Never fails to the caller; a
    /// failed read is logged and degraded to a fresh start.
    async fn load(&self) -> InventoryState;

    /// Persists the full snapshot atomically: either every product,
    /// transaction, and counter lands, or the previously committed state is
    /// left intact.
    ///
    /// # Errors
    /// Returns [`Error::Database`](crate::errors::Error::Database) when the
    /// write fails; the caller's in-memory state is unaffected either way.
    async fn save(&self, state: &InventoryState) -> Result<()>;
}
