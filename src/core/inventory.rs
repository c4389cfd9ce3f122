//! Inventory business logic - price and stock history folds.
//!
//! Prices and stock levels are never stored as columns on the product row.
//! A product's current price is the newest entry in its append-only price
//! history, and its current stock is the sum of all signed deltas in its
//! append-only stock history. Both reads are pure folds; writes only ever
//! append new history rows.

use crate::{
    entities::{
        Product, ProductPriceHistory, StockHistory, product, product_price_history, stock_history,
    },
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// A product together with its computed current stock level.
#[derive(Debug, Clone)]
pub struct StockLevel {
    /// The product
    pub product: product::Model,
    /// Sum of all stock-history deltas for the product
    pub quantity: i64,
}

/// One page of the stock overview.
#[derive(Debug, Clone)]
pub struct StockPage {
    /// Products on this page with their current quantities
    pub items: Vec<StockLevel>,
    /// Total number of products across all pages
    pub total_count: u64,
}

/// A product as shown at the register: current price and quantity attached.
#[derive(Debug, Clone)]
pub struct ProductListing {
    /// The product
    pub product: product::Model,
    /// Current unit price (0.0 if the product has no price history)
    pub price: f64,
    /// Current stock level
    pub quantity: i64,
}

/// Returns the price-history row currently in effect for a product, if any.
///
/// "Current" means the newest row by `created_at`, with the row id breaking
/// ties so two price changes in the same instant resolve deterministically.
pub async fn current_price_row<C>(
    db: &C,
    product_id: i32,
) -> Result<Option<product_price_history::Model>>
where
    C: ConnectionTrait,
{
    ProductPriceHistory::find()
        .filter(product_price_history::Column::ProductId.eq(product_id))
        .order_by_desc(product_price_history::Column::CreatedAt)
        .order_by_desc(product_price_history::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the current unit price of a product.
///
/// A product with no price history yields 0.0. That sentinel comes from the
/// catalog setup flow, which appends the first price row at product creation;
/// a zero here means the product was never priced.
pub async fn current_price<C>(db: &C, product_id: i32) -> Result<f64>
where
    C: ConnectionTrait,
{
    Ok(current_price_row(db, product_id)
        .await?
        .map_or(0.0, |row| row.amount))
}

/// Returns the current stock level of a product: the sum of all signed
/// deltas in its stock history. Empty history folds to 0.
pub async fn current_quantity<C>(db: &C, product_id: i32) -> Result<i64>
where
    C: ConnectionTrait,
{
    let entries = StockHistory::find()
        .filter(stock_history::Column::ProductId.eq(product_id))
        .all(db)
        .await?;

    Ok(entries.iter().map(|entry| i64::from(entry.quantity)).sum())
}

/// Appends a new price-history row, making `amount` the product's current price.
///
/// # Errors
/// Returns an error if the amount is non-positive or not finite, or if the
/// product does not exist.
pub async fn set_price<C>(
    db: &C,
    product_id: i32,
    amount: f64,
) -> Result<product_price_history::Model>
where
    C: ConnectionTrait,
{
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let entry = product_price_history::ActiveModel {
        product_id: Set(product_id),
        amount: Set(amount),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Appends a signed stock delta for a product (positive restock, negative
/// correction or sale).
///
/// # Errors
/// Returns an error if the delta is zero or the product does not exist.
pub async fn record_stock<C>(
    db: &C,
    product_id: i32,
    quantity: i32,
) -> Result<stock_history::Model>
where
    C: ConnectionTrait,
{
    if quantity == 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let entry = stock_history::ActiveModel {
        product_id: Set(product_id),
        quantity: Set(quantity),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Returns one page of the stock overview: every product (alphabetical) with
/// its computed current quantity, plus the total product count.
pub async fn stock_overview(
    db: &DatabaseConnection,
    page: u64,
    page_size: u64,
) -> Result<StockPage> {
    let paginator = Product::find()
        .order_by_asc(product::Column::Name)
        .paginate(db, page_size.max(1));

    let total_count = paginator.num_items().await?;
    let products = paginator.fetch_page(page.saturating_sub(1)).await?;

    let mut items = Vec::with_capacity(products.len());
    for product in products {
        let quantity = current_quantity(db, product.id).await?;
        items.push(StockLevel { product, quantity });
    }

    Ok(StockPage { items, total_count })
}

/// Returns every AVAILABLE product with its current price and quantity,
/// sorted by current quantity descending so the register shows well-stocked
/// items first.
pub async fn available_products(db: &DatabaseConnection) -> Result<Vec<ProductListing>> {
    let products = Product::find()
        .filter(product::Column::Status.eq(product::STATUS_AVAILABLE))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;

    let mut listings = Vec::with_capacity(products.len());
    for product in products {
        let price = current_price(db, product.id).await?;
        let quantity = current_quantity(db, product.id).await?;
        listings.push(ProductListing {
            product,
            price,
            quantity,
        });
    }

    listings.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    Ok(listings)
}
