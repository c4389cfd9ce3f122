//! Payment record entity - One payment event made by a customer.
//!
//! Immutable once created; the split across settled transactions lives in
//! [`super::payment_record_list`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment-record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_records")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the customer who paid
    pub customer_id: String,
    /// Amount handed over in this payment event
    pub amount: f64,
    /// When the payment was received
    pub created_at: DateTimeUtc,
}

/// Defines relationships between payment records and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    /// One payment is allocated across many transactions
    #[sea_orm(has_many = "super::payment_record_list::Entity")]
    Allocations,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::payment_record_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
