//! Core business logic - the inventory/transaction consistency engine.
//!
//! The engine owns the aggregate state for the process lifetime and applies
//! every stock-moving operation to it, keeping product stock, transaction
//! history, and cumulative profit mutually consistent. It is fully
//! synchronous and framework-agnostic: persistence and presentation live
//! behind their own modules and only ever see the engine through its
//! operations and the [`InventoryState`] snapshot.

/// Product lifecycle operations (register, edit, delete) and queries
pub mod product;
/// Aggregate report generation
pub mod report;
/// The aggregate state the engine owns
pub mod state;
/// Stock movements (inbound/outbound) and transaction history queries
pub mod transaction;

pub use product::ProductUpdate;
pub use report::{BestSeller, ReportSnapshot};
pub use state::{InventoryState, LOW_STOCK_THRESHOLD};
pub use transaction::OutboundReceipt;

/// Applies operations to one [`InventoryState`] and enforces its invariants.
///
/// The engine is constructed from a loaded state and owns it from then on;
/// there are no ambient globals. All mutations are synchronous and operate on
/// `&mut self`, so a deployment with concurrent callers must serialize
/// mutating calls (one writer at a time) to keep check-and-decrement atomic.
#[derive(Debug)]
pub struct InventoryEngine {
    state: InventoryState,
}

impl InventoryEngine {
    /// Creates an engine owning the given state, typically the result of
    /// [`StateStore::load`](crate::store::StateStore::load).
    #[must_use]
    pub fn new(state: InventoryState) -> Self {
        Self { state }
    }

    /// Read access to the aggregate state, used by the store to persist the
    /// full snapshot after a mutation.
    #[must_use]
    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut InventoryState {
        &mut self.state
    }
}
