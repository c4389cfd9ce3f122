//! Stock recording and overview operations.

use crate::{
    core::inventory,
    entities::{product, stock_history},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Request to record a stock movement.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreateStockRequest {
    /// Product the delta applies to
    pub product_id: i32,
    /// Signed delta (positive restock, negative correction)
    pub quantity: i32,
}

/// Request for one page of the stock overview.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetStockRequest {
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub page_size: u64,
}

/// A product with its computed current stock.
#[derive(Debug, Clone, Serialize)]
pub struct StockLevelDto {
    /// The product row
    pub product: product::Model,
    /// Current stock level (sum of all deltas)
    pub quantity: i64,
}

/// One page of the stock overview.
#[derive(Debug, Clone, Serialize)]
pub struct GetStockResponse {
    /// Products on this page with their quantities
    pub products: Vec<StockLevelDto>,
    /// Total product count
    pub total_products: u64,
}

/// Appends a stock delta for a product.
pub async fn create(
    db: &DatabaseConnection,
    req: CreateStockRequest,
) -> Result<stock_history::Model> {
    inventory::record_stock(db, req.product_id, req.quantity).await
}

/// Returns one page of products with their current stock levels.
pub async fn get_products(
    db: &DatabaseConnection,
    req: GetStockRequest,
) -> Result<GetStockResponse> {
    let page = inventory::stock_overview(db, req.page, req.page_size).await?;
    Ok(GetStockResponse {
        products: page
            .items
            .into_iter()
            .map(|level| StockLevelDto {
                product: level.product,
                quantity: level.quantity,
            })
            .collect(),
        total_products: page.total_count,
    })
}
