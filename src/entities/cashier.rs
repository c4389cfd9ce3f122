//! Cashier entity - An employee who rings up sales at the register.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cashier database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cashiers")]
pub struct Model {
    /// Unique identifier for the cashier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Login username (unique)
    pub username: String,
    /// Login password
    pub password: String,
    /// Cashier's given name
    pub first_name: String,
    /// Cashier's family name
    pub last_name: String,
    /// When the cashier account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Cashier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One cashier records many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
