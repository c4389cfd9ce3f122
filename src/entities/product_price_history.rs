//! Product price history entity - Append-only price log per product.
//!
//! The newest row by `created_at` is the product's current price. Rows are
//! never updated or deleted; order lines pin the row that was current at sale
//! time so later price changes cannot rewrite past sales.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Price-history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_price_history")]
pub struct Model {
    /// Unique identifier for the price entry
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the product this price belongs to
    pub product_id: i32,
    /// Unit price in effect from `created_at` onward
    pub amount: f64,
    /// When this price took effect
    pub created_at: DateTimeUtc,
}

/// Defines relationships between price history and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each price entry belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// One price entry is snapshotted by many order lines
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
