//! The aggregate inventory state: products, transaction history, cumulative
//! profit, and the id counters.
//!
//! This is the unit of persistence - the store loads it wholesale at startup
//! and saves it wholesale after every mutation.

use std::collections::BTreeMap;

use crate::entities::{product, transaction};

/// Stock level at or below which a product is flagged for attention.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Everything the engine tracks, in one owned value.
///
/// Invariants maintained by the engine:
/// - every `stock_quantity` is non-negative;
/// - `cumulative_profit` equals the sum of `profit` over all outbound
///   transactions in `transactions`;
/// - `next_product_id` is greater than any product id ever assigned, and
///   likewise for `next_transaction_id`, so ids are never reused across
///   restarts.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryState {
    /// Products keyed by id; iteration order is id order, which is also the
    /// listing order.
    pub products: BTreeMap<i64, product::Model>,
    /// Append-only history in insertion order.
    pub transactions: Vec<transaction::Model>,
    /// Running total of profit across all outbound transactions ever
    /// recorded. Never decremented, not even by product deletion.
    pub cumulative_profit: f64,
    /// Next id to assign to a product.
    pub next_product_id: i64,
    /// Next id to assign to a transaction.
    pub next_transaction_id: i64,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            transactions: Vec::new(),
            cumulative_profit: 0.0,
            next_product_id: 1,
            next_transaction_id: 1,
        }
    }
}
