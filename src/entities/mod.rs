//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships, and
//! double as the in-memory domain types held by the inventory engine.

pub mod product;
pub mod system_state;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel, TransactionKind,
};
