//! Core business logic - framework-agnostic catalog, inventory, checkout,
//! ledger, and reporting operations.
//!
//! Everything in here takes a database connection and plain values; the RPC
//! layer is a thin typed wrapper over these functions.

use sea_orm::entity::prelude::DateTimeUtc;

/// Catalog management: categories and products
pub mod catalog;
/// Order entry: recording cash and credit sales
pub mod checkout;
/// Customer accounts, credit views, and payment history
pub mod customer;
/// Cashier account management
pub mod employee;
/// Price/stock history folds and stock movements
pub mod inventory;
/// Credit settlement: FIFO payment allocation
pub mod ledger;
/// Sales reports and dashboard aggregates
pub mod report;

/// Optional inclusive date interval used by report and history queries.
/// An open bound means "no limit on that side".
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    /// Earliest timestamp to include
    pub from: Option<DateTimeUtc>,
    /// Latest timestamp to include
    pub to: Option<DateTimeUtc>,
}
