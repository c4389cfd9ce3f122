//! Register operations - order entry and the cashier-facing listings.

use crate::{
    core::{checkout, customer as customer_core, inventory},
    entities::{customer, order, product, transaction},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// One product line of an incoming sale.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderLineDto {
    /// Product to sell
    pub product_id: i32,
    /// Units to sell
    pub quantity: i32,
}

/// Request to record a sale.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSaleRequest {
    /// Cashier ringing up the sale
    pub cashier_id: i32,
    /// Customer the sale is attributed to; required for CREDIT
    pub customer_id: Option<String>,
    /// CASH or CREDIT
    pub transaction_type: String,
    /// Amount tendered (ignored for CREDIT)
    pub total_paid: f64,
    /// Product lines
    pub orders: Vec<OrderLineDto>,
}

/// Result of recording a sale.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSaleResponse {
    /// The recorded transaction
    pub transaction: transaction::Model,
    /// The recorded order lines
    pub orders: Vec<order::Model>,
    /// Cash handed back to the customer
    pub change: f64,
}

/// A product as shown at the register.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterProductDto {
    /// The product row
    pub product: product::Model,
    /// Current unit price
    pub price: f64,
    /// Current stock level
    pub quantity: i64,
}

/// Records a sale.
pub async fn create(db: &DatabaseConnection, req: CreateSaleRequest) -> Result<CreateSaleResponse> {
    let lines: Vec<checkout::OrderLineInput> = req
        .orders
        .iter()
        .map(|line| checkout::OrderLineInput {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();

    let outcome = checkout::create_sale(
        db,
        req.cashier_id,
        req.customer_id,
        &req.transaction_type,
        req.total_paid,
        &lines,
    )
    .await?;

    Ok(CreateSaleResponse {
        transaction: outcome.transaction,
        orders: outcome.lines,
        change: outcome.change,
    })
}

/// Returns the AVAILABLE products with price and stock, best-stocked first.
pub async fn get_products(db: &DatabaseConnection) -> Result<Vec<RegisterProductDto>> {
    let listings = inventory::available_products(db).await?;
    Ok(listings
        .into_iter()
        .map(|listing| RegisterProductDto {
            product: listing.product,
            price: listing.price,
            quantity: listing.quantity,
        })
        .collect())
}

/// Returns every customer for the register's customer picker.
pub async fn get_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    customer_core::list_all_customers(db).await
}
