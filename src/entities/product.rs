//! Product entity - Represents one catalog item.
//!
//! A product carries no price or stock column of its own: the current price is
//! the newest [`super::product_price_history`] row and the current stock is
//! the sum of [`super::stock_history`] deltas. Order lines reference products
//! together with the price-history row active at sale time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Availability status value for products visible at the register
pub const STATUS_AVAILABLE: &str = "AVAILABLE";
/// Availability status value for products hidden from the register
pub const STATUS_NOT_AVAILABLE: &str = "NOT_AVAILABLE";

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Name of the product (e.g., "Iced Tea", "Banana Cue")
    pub name: String,
    /// URL of the product image shown at the register
    pub image_url: String,
    /// ID of the category this product belongs to
    pub category_id: i32,
    /// Availability status: [`STATUS_AVAILABLE`] or [`STATUS_NOT_AVAILABLE`]
    pub status: String,
    /// When the product was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One product has many price-history rows
    #[sea_orm(has_many = "super::product_price_history::Entity")]
    PriceHistory,
    /// One product has many stock-history rows
    #[sea_orm(has_many = "super::stock_history::Entity")]
    StockHistory,
    /// One product appears on many order lines
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_price_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PriceHistory.def()
    }
}

impl Related<super::stock_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockHistory.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
