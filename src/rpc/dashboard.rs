//! Dashboard aggregate operations.

use crate::{core::report, entities::transaction, errors::Result};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// The back-office dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct GetDashboardDataResponse {
    /// The eight most recent unpaid credit sales
    pub transactions: Vec<transaction::Model>,
    /// Number of customer accounts
    pub customer_count: u64,
    /// Number of AVAILABLE products
    pub product_count: u64,
    /// Sum of `total_cost` over every fully paid transaction
    pub overall_sales: f64,
    /// Sum of `total_cost` over fully paid transactions this month
    pub monthly_sales: f64,
}

/// Gathers the dashboard aggregates.
pub async fn get_dashboard_data(db: &DatabaseConnection) -> Result<GetDashboardDataResponse> {
    let data = report::dashboard(db).await?;
    Ok(GetDashboardDataResponse {
        transactions: data.recent_credit,
        customer_count: data.customer_count,
        product_count: data.product_count,
        overall_sales: data.overall_sales,
        monthly_sales: data.monthly_sales,
    })
}
