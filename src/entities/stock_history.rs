//! Stock history entity - Append-only signed stock deltas per product.
//!
//! Negative on sale, positive on restock; the current stock level is the sum
//! of all deltas for the product. Rows are never updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock-history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_history")]
pub struct Model {
    /// Unique identifier for the stock entry
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the product this delta applies to
    pub product_id: i32,
    /// Signed quantity delta (negative on sale, positive on restock)
    pub quantity: i32,
    /// When the delta was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between stock history and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each stock entry belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
