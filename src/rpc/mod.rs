//! Typed RPC layer - request/response pairs over the core operations.
//!
//! Each module mirrors one area of the back office: every operation is an
//! async handler taking a database connection and a deserializable request
//! struct, returning a serializable response. Transport, response caching,
//! and session handling live outside this crate.

/// Register operations: product listing and order entry
pub mod cashier;
/// Category management
pub mod category;
/// Customer accounts, credit payment, and history
pub mod customer;
/// Dashboard aggregates
pub mod dashboard;
/// Cashier account management
pub mod employee;
/// Product catalog management
pub mod product;
/// Stock recording and overview
pub mod stock;
/// Sales reports
pub mod transaction;

use crate::core;
use sea_orm::entity::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};

/// Optional inclusive date interval carried by report and history requests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateRangeDto {
    /// Earliest timestamp to include
    pub from: Option<DateTimeUtc>,
    /// Latest timestamp to include
    pub to: Option<DateTimeUtc>,
}

impl From<DateRangeDto> for core::DateRange {
    fn from(dto: DateRangeDto) -> Self {
        Self {
            from: dto.from,
            to: dto.to,
        }
    }
}
