//! Stock movement business logic - inbound restocks and outbound sales.
//!
//! Every movement appends exactly one transaction to the history and adjusts
//! the product's stock; outbound movements additionally realize profit into
//! the cumulative total. A rejected movement leaves the aggregate state
//! untouched, so the stock check and the decrement are atomic with respect
//! to the caller.

use chrono::Utc;

use crate::{
    core::{InventoryEngine, state::LOW_STOCK_THRESHOLD},
    entities::{TransactionKind, transaction},
    errors::{Error, Result},
};

/// Result of a successful outbound movement.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundReceipt {
    /// The recorded transaction
    pub transaction: transaction::Model,
    /// True when the product's remaining stock is at or below
    /// [`LOW_STOCK_THRESHOLD`]; callers decide how to surface it.
    pub low_stock: bool,
}

fn validate_quantity(quantity: i64) -> Result<()> {
    if quantity <= 0 {
        return Err(Error::Validation {
            message: format!("quantity must be positive, got {quantity}"),
        });
    }
    Ok(())
}

impl InventoryEngine {
    /// Records a stock-increasing movement and returns the transaction.
    ///
    /// The unit value captured is the product's current cost price; inbound
    /// movements carry no profit.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the quantity is not positive, or
    /// [`Error::ProductNotFound`] if the product does not exist.
    pub fn record_inbound(&mut self, product_id: i64, quantity: i64) -> Result<transaction::Model> {
        validate_quantity(quantity)?;

        let state = self.state_mut();
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or(Error::ProductNotFound { id: product_id })?;

        product.stock_quantity += quantity;
        let record = transaction::Model {
            id: state.next_transaction_id,
            product_id,
            product_name: product.name.clone(),
            kind: TransactionKind::Inbound,
            quantity,
            unit_value: product.cost_price,
            profit: 0.0,
            timestamp: Utc::now(),
        };
        state.next_transaction_id += 1;
        state.transactions.push(record.clone());
        Ok(record)
    }

    /// Records a stock-decreasing movement (a sale) and returns a receipt
    /// with the transaction and a low-stock flag.
    ///
    /// The unit value captured is the product's current sale price, and the
    /// realized profit `(sale - cost) * quantity` is added to the cumulative
    /// total.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the quantity is not positive,
    /// [`Error::ProductNotFound`] if the product does not exist, or
    /// [`Error::InsufficientStock`] if the quantity exceeds the units on
    /// hand. No partial fulfillment: a rejected sale changes nothing.
    pub fn record_outbound(&mut self, product_id: i64, quantity: i64) -> Result<OutboundReceipt> {
        validate_quantity(quantity)?;

        let state = self.state_mut();
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or(Error::ProductNotFound { id: product_id })?;

        if quantity > product.stock_quantity {
            return Err(Error::InsufficientStock {
                available: product.stock_quantity,
                requested: quantity,
            });
        }

        product.stock_quantity -= quantity;
        let profit = (product.sale_price - product.cost_price) * quantity as f64;
        let record = transaction::Model {
            id: state.next_transaction_id,
            product_id,
            product_name: product.name.clone(),
            kind: TransactionKind::Outbound,
            quantity,
            unit_value: product.sale_price,
            profit,
            timestamp: Utc::now(),
        };
        let low_stock = product.stock_quantity <= LOW_STOCK_THRESHOLD;

        state.next_transaction_id += 1;
        state.cumulative_profit += profit;
        state.transactions.push(record.clone());
        Ok(OutboundReceipt {
            transaction: record,
            low_stock,
        })
    }

    /// The most recent `limit` transactions, newest first.
    #[must_use]
    pub fn list_transactions(&self, limit: usize) -> Vec<transaction::Model> {
        self.state()
            .transactions
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::InventoryState;
    use crate::errors::Error;

    /// Engine with one product: "Widget", 10 on hand, cost 5.00, sale 8.00.
    fn engine_with_widget() -> (InventoryEngine, i64) {
        let mut engine = InventoryEngine::new(InventoryState::default());
        let id = engine
            .register_product("Widget", 10, 5.0, 8.0)
            .unwrap()
            .id;
        (engine, id)
    }

    /// The cumulative profit invariant: always the sum of outbound profits.
    fn outbound_profit_sum(engine: &InventoryEngine) -> f64 {
        engine
            .state()
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Outbound)
            .map(|t| t.profit)
            .sum()
    }

    #[test]
    fn test_record_inbound() {
        let (mut engine, id) = engine_with_widget();

        let record = engine.record_inbound(id, 5).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.kind, TransactionKind::Inbound);
        assert_eq!(record.quantity, 5);
        assert_eq!(record.unit_value, 5.0);
        assert_eq!(record.profit, 0.0);
        assert_eq!(record.product_name, "Widget");

        assert_eq!(engine.product(id).unwrap().stock_quantity, 15);
        assert_eq!(engine.state().cumulative_profit, 0.0);
    }

    #[test]
    fn test_record_inbound_rejects_non_positive_quantity() {
        let (mut engine, id) = engine_with_widget();
        assert!(matches!(
            engine.record_inbound(id, 0),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            engine.record_inbound(id, -3),
            Err(Error::Validation { .. })
        ));
        assert!(engine.state().transactions.is_empty());
    }

    #[test]
    fn test_record_inbound_unknown_product() {
        let (mut engine, _) = engine_with_widget();
        assert!(matches!(
            engine.record_inbound(42, 1),
            Err(Error::ProductNotFound { id: 42 })
        ));
    }

    #[test]
    fn test_record_outbound_realizes_profit() {
        let (mut engine, id) = engine_with_widget();
        engine.record_inbound(id, 5).unwrap(); // stock now 15

        let receipt = engine.record_outbound(id, 3).unwrap();
        assert_eq!(receipt.transaction.kind, TransactionKind::Outbound);
        assert_eq!(receipt.transaction.unit_value, 8.0);
        assert_eq!(receipt.transaction.profit, 9.0); // (8 - 5) * 3
        assert!(!receipt.low_stock); // 12 > 5

        assert_eq!(engine.product(id).unwrap().stock_quantity, 12);
        assert_eq!(engine.state().cumulative_profit, 9.0);
        assert_eq!(outbound_profit_sum(&engine), 9.0);
    }

    #[test]
    fn test_record_outbound_insufficient_stock_changes_nothing() {
        let (mut engine, id) = engine_with_widget();
        engine.record_inbound(id, 5).unwrap(); // stock now 15
        let before = engine.state().clone();

        let result = engine.record_outbound(id, 20);
        assert!(matches!(
            result,
            Err(Error::InsufficientStock {
                available: 15,
                requested: 20
            })
        ));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_record_outbound_flags_low_stock() {
        let (mut engine, id) = engine_with_widget();
        engine.record_inbound(id, 5).unwrap(); // stock 15
        engine.record_outbound(id, 3).unwrap(); // stock 12

        let receipt = engine.record_outbound(id, 7).unwrap(); // stock 5
        assert!(receipt.low_stock);
        assert_eq!(engine.product(id).unwrap().stock_quantity, 5);
        assert_eq!(engine.state().cumulative_profit, 9.0 + 21.0);
        assert_eq!(outbound_profit_sum(&engine), engine.state().cumulative_profit);
    }

    #[test]
    fn test_record_outbound_can_empty_stock_but_not_overdraw() {
        let (mut engine, id) = engine_with_widget();

        engine.record_outbound(id, 10).unwrap();
        assert_eq!(engine.product(id).unwrap().stock_quantity, 0);

        // Stock is empty; any further sale must fail and stock stays at 0.
        assert!(matches!(
            engine.record_outbound(id, 1),
            Err(Error::InsufficientStock {
                available: 0,
                requested: 1
            })
        ));
        assert_eq!(engine.product(id).unwrap().stock_quantity, 0);
    }

    #[test]
    fn test_cumulative_profit_survives_product_deletion() {
        let (mut engine, id) = engine_with_widget();
        engine.record_outbound(id, 3).unwrap();
        assert_eq!(engine.state().cumulative_profit, 9.0);

        engine.delete_product(id).unwrap();
        // History and profit are untouched by deletion.
        assert!(engine.list_products().is_empty());
        assert_eq!(engine.state().cumulative_profit, 9.0);
        let history = engine.list_transactions(10);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].product_id, id);
    }

    #[test]
    fn test_transaction_ids_are_monotonic() {
        let (mut engine, id) = engine_with_widget();
        let first = engine.record_inbound(id, 1).unwrap();
        let second = engine.record_outbound(id, 1).unwrap().transaction;
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(engine.state().next_transaction_id, 3);
    }

    #[test]
    fn test_list_transactions_newest_first() {
        let (mut engine, id) = engine_with_widget();
        engine.record_inbound(id, 1).unwrap();
        engine.record_inbound(id, 2).unwrap();
        engine.record_inbound(id, 3).unwrap();

        let recent = engine.list_transactions(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].quantity, 3);
        assert_eq!(recent[1].quantity, 2);

        // A limit beyond the history length returns everything.
        assert_eq!(engine.list_transactions(100).len(), 3);
    }

    #[test]
    fn test_unit_value_captured_at_transaction_time() {
        let (mut engine, id) = engine_with_widget();
        engine.record_outbound(id, 1).unwrap();

        // Later price edits must not rewrite history.
        engine
            .edit_product(
                id,
                crate::core::ProductUpdate {
                    name: None,
                    cost_price: Some(6.0),
                    sale_price: Some(10.0),
                },
            )
            .unwrap();

        let history = engine.list_transactions(10);
        assert_eq!(history[0].unit_value, 8.0);
        assert_eq!(history[0].profit, 3.0);
    }

    #[test]
    fn test_product_name_snapshot_survives_rename() {
        let (mut engine, id) = engine_with_widget();
        engine.record_inbound(id, 1).unwrap();
        engine
            .edit_product(id, crate::core::ProductUpdate::rename("Gadget"))
            .unwrap();

        assert_eq!(engine.list_transactions(1)[0].product_name, "Widget");
    }
}
