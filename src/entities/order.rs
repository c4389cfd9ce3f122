//! Order entity - One product line within a transaction.
//!
//! Each line pins the price-history row that was current when the sale was
//! rung up, so the amount charged survives later price changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order-line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the transaction this line belongs to
    pub transaction_id: i64,
    /// ID of the product sold
    pub product_id: i32,
    /// ID of the price-history row active at sale time (the price snapshot)
    pub product_price_id: i32,
    /// Number of units sold
    pub quantity: i32,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order line belongs to one transaction
    #[sea_orm(
        belongs_to = "super::transaction::Entity",
        from = "Column::TransactionId",
        to = "super::transaction::Column::Id"
    )]
    Transaction,
    /// Each order line references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each order line pins one price-history row
    #[sea_orm(
        belongs_to = "super::product_price_history::Entity",
        from = "Column::ProductPriceId",
        to = "super::product_price_history::Column::Id"
    )]
    ProductPrice,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::product_price_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductPrice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
