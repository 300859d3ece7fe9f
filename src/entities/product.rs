//! Product entity - Represents a product held in inventory.
//!
//! Each product carries its current stock level and both prices (cost and
//! sale). Ids are assigned by the inventory engine from a persisted counter,
//! never by the database, so the same model doubles as the in-memory domain
//! type and the persisted row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier, assigned by the engine and immutable thereafter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Name of the product (non-empty, at most 100 characters)
    pub name: String,
    /// Units currently on hand, never negative
    pub stock_quantity: i64,
    /// Purchase price per unit
    pub cost_price: f64,
    /// Selling price per unit, strictly above `cost_price`
    pub sale_price: f64,
    /// When the product was registered
    pub registered_at: DateTimeUtc,
}

/// Products stand alone; transactions reference them only weakly so that
/// history survives product deletion.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Profit margin as a percentage of the sale price.
    ///
    /// Returns 0 when the sale price is not positive, so the derived value is
    /// always defined.
    #[must_use]
    pub fn profit_margin(&self) -> f64 {
        if self.sale_price > 0.0 {
            (self.sale_price - self.cost_price) / self.sale_price * 100.0
        } else {
            0.0
        }
    }
}
