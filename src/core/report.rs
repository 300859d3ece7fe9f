//! Report generation business logic.
//!
//! Aggregates the current state into a [`ReportSnapshot`]: totals, the
//! highest-margin product, products running low, and the best seller. The
//! snapshot is plain data; presentation adapters decide how to render it.

use crate::{
    core::{InventoryEngine, state::LOW_STOCK_THRESHOLD},
    entities::{TransactionKind, product},
};
use std::collections::BTreeMap;

/// The product that sold the most units, by cumulative outbound quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSeller {
    /// Product name as recorded on the transactions (the name at sale time)
    pub product_name: String,
    /// Total units sold under that name
    pub units_sold: i64,
}

/// Aggregate totals and highlights over the whole inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSnapshot {
    /// Number of registered products
    pub product_count: usize,
    /// Number of recorded transactions
    pub transaction_count: usize,
    /// Running total of realized profit
    pub cumulative_profit: f64,
    /// Total units on hand across all products
    pub units_in_stock: i64,
    /// Total cost value of the stock on hand (sum of cost price x quantity)
    pub stock_cost_value: f64,
    /// Product with the highest profit margin, if any products exist.
    /// Ties resolve to the product with the smaller id.
    pub highest_margin: Option<product::Model>,
    /// Products at or below [`LOW_STOCK_THRESHOLD`], in id order
    pub low_stock: Vec<product::Model>,
    /// Best-selling product by total outbound quantity, if any sales exist.
    /// Sales are grouped by the recorded product name; ties resolve to the
    /// lexicographically smaller name.
    pub best_seller: Option<BestSeller>,
}

impl InventoryEngine {
    /// Builds a report snapshot of the current aggregate state.
    #[must_use]
    pub fn build_report(&self) -> ReportSnapshot {
        let state = self.state();

        let units_in_stock = state.products.values().map(|p| p.stock_quantity).sum();
        let stock_cost_value = state
            .products
            .values()
            .map(|p| p.cost_price * p.stock_quantity as f64)
            .sum();

        // Products iterate in id order, so keeping only strictly-greater
        // margins makes the smaller id win ties.
        let highest_margin = state
            .products
            .values()
            .fold(None::<&product::Model>, |best, p| match best {
                Some(b) if p.profit_margin() <= b.profit_margin() => Some(b),
                _ => Some(p),
            })
            .cloned();

        let low_stock = state
            .products
            .values()
            .filter(|p| p.stock_quantity <= LOW_STOCK_THRESHOLD)
            .cloned()
            .collect();

        let mut sold_by_name: BTreeMap<&str, i64> = BTreeMap::new();
        for t in &state.transactions {
            if t.kind == TransactionKind::Outbound {
                *sold_by_name.entry(t.product_name.as_str()).or_insert(0) += t.quantity;
            }
        }
        // Names iterate in ascending order, so keeping only strictly-greater
        // totals makes the lexicographically smaller name win ties.
        let best_seller = sold_by_name
            .into_iter()
            .fold(None::<BestSeller>, |best, (name, units)| match best {
                Some(b) if units <= b.units_sold => Some(b),
                _ => Some(BestSeller {
                    product_name: name.to_string(),
                    units_sold: units,
                }),
            });

        ReportSnapshot {
            product_count: state.products.len(),
            transaction_count: state.transactions.len(),
            cumulative_profit: state.cumulative_profit,
            units_in_stock,
            stock_cost_value,
            highest_margin,
            low_stock,
            best_seller,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{InventoryState, InventoryEngine};

    #[test]
    fn test_report_on_empty_state() {
        let engine = InventoryEngine::new(InventoryState::default());
        let report = engine.build_report();

        assert_eq!(report.product_count, 0);
        assert_eq!(report.transaction_count, 0);
        assert_eq!(report.cumulative_profit, 0.0);
        assert_eq!(report.units_in_stock, 0);
        assert_eq!(report.stock_cost_value, 0.0);
        assert!(report.highest_margin.is_none());
        assert!(report.low_stock.is_empty());
        assert!(report.best_seller.is_none());
    }

    #[test]
    fn test_report_totals() {
        let mut engine = InventoryEngine::new(InventoryState::default());
        let widget = engine.register_product("Widget", 10, 5.0, 8.0).unwrap();
        let gadget = engine.register_product("Gadget", 4, 2.0, 3.0).unwrap();
        engine.record_outbound(widget.id, 2).unwrap();

        let report = engine.build_report();
        assert_eq!(report.product_count, 2);
        assert_eq!(report.transaction_count, 1);
        assert_eq!(report.cumulative_profit, 6.0);
        assert_eq!(report.units_in_stock, 8 + 4);
        assert_eq!(report.stock_cost_value, 8.0 * 5.0 + 4.0 * 2.0);
        // Widget margin 37.5% beats Gadget's 33.3%.
        assert_eq!(report.highest_margin.unwrap().id, widget.id);
        // Gadget sits at 4 units, at or below the threshold of 5.
        assert_eq!(report.low_stock.len(), 1);
        assert_eq!(report.low_stock[0].id, gadget.id);
    }

    #[test]
    fn test_highest_margin_tie_prefers_smaller_id() {
        let mut engine = InventoryEngine::new(InventoryState::default());
        let first = engine.register_product("First", 10, 5.0, 8.0).unwrap();
        engine.register_product("Second", 10, 10.0, 16.0).unwrap();

        let report = engine.build_report();
        assert_eq!(report.highest_margin.unwrap().id, first.id);
    }

    #[test]
    fn test_best_seller_by_total_outbound_quantity() {
        let mut engine = InventoryEngine::new(InventoryState::default());
        let widget = engine.register_product("Widget", 20, 5.0, 8.0).unwrap();
        let gadget = engine.register_product("Gadget", 20, 2.0, 3.0).unwrap();

        engine.record_outbound(widget.id, 3).unwrap();
        engine.record_outbound(gadget.id, 4).unwrap();
        engine.record_outbound(widget.id, 2).unwrap();
        // Inbound movements never count towards sales.
        engine.record_inbound(gadget.id, 50).unwrap();

        let best = engine.build_report().best_seller.unwrap();
        assert_eq!(best.product_name, "Widget");
        assert_eq!(best.units_sold, 5);
    }

    #[test]
    fn test_best_seller_tie_prefers_lexicographic_name() {
        let mut engine = InventoryEngine::new(InventoryState::default());
        let zebra = engine.register_product("Zebra", 10, 1.0, 2.0).unwrap();
        let apple = engine.register_product("Apple", 10, 1.0, 2.0).unwrap();

        engine.record_outbound(zebra.id, 5).unwrap();
        engine.record_outbound(apple.id, 5).unwrap();

        let best = engine.build_report().best_seller.unwrap();
        assert_eq!(best.product_name, "Apple");
    }

    #[test]
    fn test_best_seller_groups_by_recorded_name() {
        let mut engine = InventoryEngine::new(InventoryState::default());
        let id = engine.register_product("Widget", 10, 1.0, 2.0).unwrap().id;

        engine.record_outbound(id, 2).unwrap();
        engine
            .edit_product(id, crate::core::ProductUpdate::rename("Gadget"))
            .unwrap();
        engine.record_outbound(id, 3).unwrap();

        // Sales recorded under the old name stay grouped under it.
        let best = engine.build_report().best_seller.unwrap();
        assert_eq!(best.product_name, "Gadget");
        assert_eq!(best.units_sold, 3);
    }
}
