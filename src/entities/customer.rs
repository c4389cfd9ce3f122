//! Customer entity - A credit-account holder.
//!
//! The primary key is a caller-assigned string (school or employee ID printed
//! on the customer's card), not an auto-increment integer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Caller-assigned customer identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Customer's given name
    pub first_name: String,
    /// Customer's family name
    pub last_name: String,
    /// Contact number for collection follow-ups
    pub contact_number: String,
    /// When the customer account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many transactions (credit sales and attributed cash sales)
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    /// One customer has many payment records
    #[sea_orm(has_many = "super::payment_record::Entity")]
    PaymentRecords,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::payment_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
