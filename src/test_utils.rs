//! Shared test utilities for `Stockroom`.
//!
//! This module provides common helper functions for setting up test
//! databases and building known-good states with fixed timestamps, so
//! round-trip comparisons are exact.
#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    core::InventoryState,
    entities::{TransactionKind, product, transaction},
    errors::Result,
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A product with fixed field values; timestamps are whole seconds so they
/// survive any storage round trip exactly.
#[must_use]
pub fn sample_product(id: i64, name: &str, stock_quantity: i64) -> product::Model {
    product::Model {
        id,
        name: name.to_string(),
        stock_quantity,
        cost_price: 5.0,
        sale_price: 8.0,
        registered_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// A transaction with fixed field values, consistent with
/// [`sample_product`]'s prices.
#[must_use]
pub fn sample_transaction(id: i64, product_id: i64, kind: TransactionKind) -> transaction::Model {
    let quantity = 2;
    let (unit_value, profit) = match kind {
        TransactionKind::Inbound => (5.0, 0.0),
        TransactionKind::Outbound => (8.0, 3.0 * quantity as f64),
    };
    transaction::Model {
        id,
        product_id,
        product_name: "Widget".to_string(),
        kind,
        quantity,
        unit_value,
        profit,
        timestamp: Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap(),
    }
}

/// A fully populated state whose invariants hold: the cumulative profit is
/// the outbound profit sum and both counters exceed every assigned id.
#[must_use]
pub fn sample_state() -> InventoryState {
    let mut state = InventoryState::default();
    state.products.insert(1, sample_product(1, "Widget", 12));
    state.products.insert(2, sample_product(2, "Gadget", 4));
    state
        .transactions
        .push(sample_transaction(1, 1, TransactionKind::Inbound));
    state
        .transactions
        .push(sample_transaction(2, 1, TransactionKind::Outbound));
    state
        .transactions
        .push(sample_transaction(3, 2, TransactionKind::Outbound));
    state.cumulative_profit = 12.0;
    state.next_product_id = 3;
    state.next_transaction_id = 4;
    state
}
