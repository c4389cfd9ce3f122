//! Unified error types and result handling for the canteen POS core.
//!
//! Domain errors carry the identifiers or amounts that caused them so callers
//! can surface a useful message without re-querying. Database, I/O, and
//! environment errors convert automatically via `#[from]`.

use thiserror::Error;

/// All errors produced by the canteen POS core.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failure
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (config file reads, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Monetary amount is non-positive, NaN, or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Stock delta or order quantity is not usable
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// No category row with this id
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// Category primary key
        id: i32,
    },

    /// No product row with this id
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Product primary key
        id: i32,
    },

    /// Product exists but has no price-history row to snapshot
    #[error("Product {id} has no recorded price")]
    ProductUnpriced {
        /// Product primary key
        id: i32,
    },

    /// No customer row with this id
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Customer primary key (caller-assigned string id)
        id: String,
    },

    /// No cashier row with this id
    #[error("Cashier not found: {id}")]
    CashierNotFound {
        /// Cashier primary key
        id: i32,
    },

    /// A cashier with this username already exists
    #[error("Username already taken: {username}")]
    UsernameTaken {
        /// The conflicting username
        username: String,
    },

    /// Transaction type string is neither CASH nor CREDIT
    #[error("Unknown transaction type: {value}")]
    UnknownTransactionType {
        /// The rejected type string
        value: String,
    },

    /// A CREDIT sale was submitted without a customer
    #[error("Credit sale requires a customer")]
    CreditWithoutCustomer,

    /// A sale was submitted with no order lines
    #[error("Order must contain at least one line")]
    EmptyOrder,

    /// Cash tendered does not cover the computed order cost
    #[error("Insufficient payment: tendered {tendered:.2}, required {required:.2}")]
    InsufficientPayment {
        /// Amount the customer handed over
        tendered: f64,
        /// Computed total cost of the order
        required: f64,
    },
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
