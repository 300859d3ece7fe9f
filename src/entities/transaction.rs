//! Transaction entity - Represents a single stock movement.
//!
//! Transactions are append-only history: they are created by the inbound and
//! outbound operations, never edited or deleted. The product name is
//! denormalized at transaction time so the record stays meaningful after a
//! rename or deletion of the product.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionKind {
    /// Stock-increasing movement (restock); carries no profit
    #[sea_orm(string_value = "inbound")]
    Inbound,
    /// Stock-decreasing movement (sale); carries realized profit
    #[sea_orm(string_value = "outbound")]
    Outbound,
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier, assigned by the engine and immutable thereafter
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Id of the product this movement applied to. Weak reference: the
    /// product may have been deleted since.
    pub product_id: i64,
    /// Product name captured at transaction time, not kept in sync with
    /// later renames
    pub product_name: String,
    /// Whether stock moved in or out
    pub kind: TransactionKind,
    /// Units moved, always positive
    pub quantity: i64,
    /// Unit value captured at transaction time: cost price for inbound,
    /// sale price for outbound
    pub unit_value: f64,
    /// Realized profit: zero for inbound, `(sale - cost) * quantity` for
    /// outbound
    pub profit: f64,
    /// When the movement was recorded
    pub timestamp: DateTimeUtc,
}

/// No foreign keys: product references are weak by design.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
