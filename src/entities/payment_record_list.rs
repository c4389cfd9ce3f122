//! Payment allocation entity - How much of one payment went to one transaction.
//!
//! Immutable once created. The amounts of all allocation lines for a payment
//! sum to at most the payment's amount (any leftover is returned to the
//! customer as change, never stored).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment-allocation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_record_list")]
pub struct Model {
    /// Unique identifier for the allocation line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the payment this allocation belongs to
    pub payment_record_id: i64,
    /// ID of the transaction the amount was applied to
    pub transaction_id: i64,
    /// Amount applied to the transaction
    pub amount: f64,
}

/// Defines relationships between allocations and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each allocation belongs to one payment record
    #[sea_orm(
        belongs_to = "super::payment_record::Entity",
        from = "Column::PaymentRecordId",
        to = "super::payment_record::Column::Id"
    )]
    PaymentRecord,
    /// Each allocation applies to one transaction
    #[sea_orm(
        belongs_to = "super::transaction::Entity",
        from = "Column::TransactionId",
        to = "super::transaction::Column::Id"
    )]
    Transaction,
}

impl Related<super::payment_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentRecord.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
