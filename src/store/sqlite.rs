//! `SQLite`-backed implementation of the persistence contract.
//!
//! Saving replaces the `products` and `transactions` tables wholesale and
//! upserts the bookkeeping rows, all inside one database transaction, so a
//! failure mid-write rolls back to the previously committed snapshot.
//! Loading reads everything back in id order; id order is insertion order,
//! so the reloaded history matches the in-memory one.

use sea_orm::{
    DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait, sea_query::OnConflict,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use crate::{
    core::InventoryState,
    entities::{Product, SystemState, Transaction, product, system_state, transaction},
    errors::Result,
    store::StateStore,
};

/// Bookkeeping key for the running profit total.
const KEY_CUMULATIVE_PROFIT: &str = "cumulative_profit";
/// Bookkeeping key for the product id counter.
const KEY_NEXT_PRODUCT_ID: &str = "next_product_id";
/// Bookkeeping key for the transaction id counter.
const KEY_NEXT_TRANSACTION_ID: &str = "next_transaction_id";

/// Persists the aggregate state into `SQLite` through `SeaORM`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Wraps an open database connection. Tables are expected to exist
    /// already (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_inner(&self) -> Result<InventoryState> {
        let products: BTreeMap<i64, product::Model> = Product::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let transactions = Transaction::find()
            .order_by_asc(transaction::Column::Id)
            .all(&self.db)
            .await?;

        let bookkeeping: BTreeMap<String, String> = SystemState::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| (row.key, row.value))
            .collect();

        let cumulative_profit = parse_or(&bookkeeping, KEY_CUMULATIVE_PROFIT, 0.0);

        // The persisted counters are authoritative, but clamp them against
        // the loaded rows so ids are never reused even if the bookkeeping
        // rows lag behind the data.
        let max_product_id = products.keys().max().copied().unwrap_or(0);
        let max_transaction_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        let next_product_id =
            parse_or(&bookkeeping, KEY_NEXT_PRODUCT_ID, 1).max(max_product_id + 1);
        let next_transaction_id =
            parse_or(&bookkeeping, KEY_NEXT_TRANSACTION_ID, 1).max(max_transaction_id + 1);

        Ok(InventoryState {
            products,
            transactions,
            cumulative_profit,
            next_product_id,
            next_transaction_id,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    bookkeeping: &BTreeMap<String, String>,
    key: &str,
    default: T,
) -> T {
    bookkeeping
        .get(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn product_row(p: &product::Model) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(p.id),
        name: Set(p.name.clone()),
        stock_quantity: Set(p.stock_quantity),
        cost_price: Set(p.cost_price),
        sale_price: Set(p.sale_price),
        registered_at: Set(p.registered_at),
    }
}

fn transaction_row(t: &transaction::Model) -> transaction::ActiveModel {
    transaction::ActiveModel {
        id: Set(t.id),
        product_id: Set(t.product_id),
        product_name: Set(t.product_name.clone()),
        kind: Set(t.kind),
        quantity: Set(t.quantity),
        unit_value: Set(t.unit_value),
        profit: Set(t.profit),
        timestamp: Set(t.timestamp),
    }
}

impl StateStore for SqliteStore {
    #[instrument(skip(self))]
    async fn load(&self) -> InventoryState {
        match self.load_inner().await {
            Ok(state) => {
                debug!(
                    products = state.products.len(),
                    transactions = state.transactions.len(),
                    "loaded persisted state"
                );
                state
            }
            Err(err) => {
                warn!(error = %err, "could not load persisted state, starting empty");
                InventoryState::default()
            }
        }
    }

    #[instrument(skip_all)]
    async fn save(&self, state: &InventoryState) -> Result<()> {
        let txn = self.db.begin().await?;

        Product::delete_many().exec(&txn).await?;
        if !state.products.is_empty() {
            Product::insert_many(state.products.values().map(product_row))
                .exec(&txn)
                .await?;
        }

        Transaction::delete_many().exec(&txn).await?;
        if !state.transactions.is_empty() {
            Transaction::insert_many(state.transactions.iter().map(transaction_row))
                .exec(&txn)
                .await?;
        }

        let bookkeeping = [
            (KEY_CUMULATIVE_PROFIT, state.cumulative_profit.to_string()),
            (KEY_NEXT_PRODUCT_ID, state.next_product_id.to_string()),
            (
                KEY_NEXT_TRANSACTION_ID,
                state.next_transaction_id.to_string(),
            ),
        ];
        for (key, value) in bookkeeping {
            SystemState::insert(system_state::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value),
            })
            .on_conflict(
                OnConflict::column(system_state::Column::Key)
                    .update_column(system_state::Column::Value)
                    .to_owned(),
            )
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
