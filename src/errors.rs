//! Unified error types and result handling for `Stockroom`.
//!
//! Every fallible operation in the crate returns [`Result`], so errors from
//! the engine, the store, and the console adapter all flow through a single
//! [`Error`] enum.

use thiserror::Error;

/// All error conditions the application can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input: empty name, quantity out of range,
    /// sale price not above cost price, non-finite price.
    #[error("validation failed: {message}")]
    Validation {
        /// Human-readable description of what was rejected
        message: String,
    },

    /// A referenced product id does not exist in the inventory.
    #[error("product {id} not found")]
    ProductNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// An outbound movement asked for more units than are on hand.
    /// The operation is rejected wholesale; there is no partial fulfillment.
    #[error("insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock {
        /// Units currently on hand
        available: i64,
        /// Units the caller asked to move out
        requested: i64,
    },

    /// Settings file could not be read or parsed.
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Persistence failure from the database layer.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Terminal or filesystem I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
