//! Transaction entity - One sale event, cash or credit.
//!
//! `total_cost` is fixed at creation; `total_paid` only ever increases, via
//! cash tendering at checkout or later credit settlement, and never exceeds
//! `total_cost`. `is_fully_paid` mirrors `total_paid == total_cost`. Rows are
//! never deleted: this table is the financial record.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction type value for sales paid in full at the register
pub const TYPE_CASH: &str = "CASH";
/// Transaction type value for sales charged to a customer's credit account
pub const TYPE_CREDIT: &str = "CREDIT";

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the cashier who recorded the sale
    pub cashier_id: i32,
    /// Customer the sale is attributed to; required for credit sales
    pub customer_id: Option<String>,
    /// Sale type: [`TYPE_CASH`] or [`TYPE_CREDIT`]
    pub transaction_type: String,
    /// Total cost of the order, fixed at creation
    pub total_cost: f64,
    /// Amount paid so far; monotonically non-decreasing, at most `total_cost`
    pub total_paid: f64,
    /// Whether the transaction is settled (`total_paid == total_cost`)
    pub is_fully_paid: bool,
    /// When the sale was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction is recorded by one cashier
    #[sea_orm(
        belongs_to = "super::cashier::Entity",
        from = "Column::CashierId",
        to = "super::cashier::Column::Id"
    )]
    Cashier,
    /// Each transaction may be attributed to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// One transaction has many order lines
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One transaction receives many payment allocations
    #[sea_orm(has_many = "super::payment_record_list::Entity")]
    PaymentAllocations,
}

impl Related<super::cashier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cashier.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::payment_record_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
