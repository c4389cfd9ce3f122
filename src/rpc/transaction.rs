//! Sales report operations.

use crate::{
    core::report,
    entities::transaction,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use super::DateRangeDto;

/// Request for one page of the sales report.
#[derive(Debug, Clone, Deserialize)]
pub struct GetAllSalesRequest {
    /// Optional date filter
    pub date_range: Option<DateRangeDto>,
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub items_per_page: u64,
}

/// One page of the sales report with range-wide totals.
#[derive(Debug, Clone, Serialize)]
pub struct GetAllSalesResponse {
    /// Transactions on this page, newest first
    pub transaction: Vec<transaction::Model>,
    /// Sum of `total_cost` over the range
    pub total_cost: f64,
    /// Cash portion of the total
    pub total_cash: f64,
    /// Credit portion of the total
    pub total_credit: f64,
    /// Number of transactions in the range
    pub total_count: u64,
}

/// Request for the per-product sales grouping.
#[derive(Debug, Clone, Deserialize)]
pub struct GetSalesByProductRequest {
    /// Optional date filter
    pub date_range: Option<DateRangeDto>,
    /// Restrict to one product when set
    pub product_id: Option<i32>,
}

/// Sales of one product over the range.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSalesDto {
    /// Product id
    pub product_id: i32,
    /// Product name
    pub name: String,
    /// Category name
    pub category: String,
    /// Snapshot unit price of the most recent line included
    pub price: f64,
    /// Units sold
    pub quantity: i64,
    /// Revenue for this product
    pub total_sales: f64,
}

/// Per-product sales grouping with the grand total.
#[derive(Debug, Clone, Serialize)]
pub struct GetSalesByProductResponse {
    /// One row per product, ordered by name
    pub products: Vec<ProductSalesDto>,
    /// Sum of `total_sales` over all rows
    pub total_sales: f64,
}

/// Returns one page of the sales report with totals over the range.
pub async fn get_all_sales(
    db: &DatabaseConnection,
    req: GetAllSalesRequest,
) -> Result<GetAllSalesResponse> {
    let range = req.date_range.unwrap_or_default().into();
    let report = report::sales_report(db, range, req.page, req.items_per_page).await?;
    Ok(GetAllSalesResponse {
        transaction: report.transactions,
        total_cost: report.total_cost,
        total_cash: report.cash_total,
        total_credit: report.credit_total,
        total_count: report.total_count,
    })
}

/// Returns the per-product sales grouping for the range.
pub async fn get_sales_by_product(
    db: &DatabaseConnection,
    req: GetSalesByProductRequest,
) -> Result<GetSalesByProductResponse> {
    let range = req.date_range.unwrap_or_default().into();
    let grouped = report::product_sales_report(db, range, req.product_id).await?;
    Ok(GetSalesByProductResponse {
        products: grouped
            .products
            .into_iter()
            .map(|row| ProductSalesDto {
                product_id: row.product_id,
                name: row.name,
                category: row.category,
                price: row.price,
                quantity: row.quantity,
                total_sales: row.total_sales,
            })
            .collect(),
        total_sales: grouped.grand_total,
    })
}
