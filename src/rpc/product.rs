//! Product catalog management operations.

use crate::{
    core::catalog,
    entities::{category, product},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Request to create a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    /// Product name
    pub name: String,
    /// Initial unit price (becomes the first price-history row)
    pub amount: f64,
    /// Image URL shown at the register
    pub image: String,
    /// Category the product belongs to
    pub category: i32,
}

/// Request for one page of products.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetProductsRequest {
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub page_size: u64,
}

/// A product with its category and current price.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    /// The product row
    pub product: product::Model,
    /// The product's category, if the row still exists
    pub category: Option<category::Model>,
    /// Current unit price (0.0 if unpriced)
    pub price: f64,
}

impl From<catalog::CatalogEntry> for ProductDto {
    fn from(entry: catalog::CatalogEntry) -> Self {
        Self {
            product: entry.product,
            category: entry.category,
            price: entry.price,
        }
    }
}

/// One page of products.
#[derive(Debug, Clone, Serialize)]
pub struct GetProductsResponse {
    /// Products on this page
    pub products: Vec<ProductDto>,
    /// Total product count
    pub total_products: u64,
}

/// Request to update a product.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    /// Product to update
    pub id: i32,
    /// New name
    pub name: String,
    /// New price; recorded as a price-history row when it differs
    pub amount: Option<f64>,
    /// New image URL
    pub image: String,
    /// New category
    pub category: i32,
}

/// Request to toggle a product's availability.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    /// Product to update
    pub id: i32,
    /// New status: AVAILABLE or `NOT_AVAILABLE`
    pub status: String,
}

/// Request to fetch one product.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetProductByIdRequest {
    /// Product to fetch
    pub id: i32,
}

/// Request to delete a product.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteProductRequest {
    /// Product to delete
    pub id: i32,
}

/// Creates a product with its first price-history row.
pub async fn create(db: &DatabaseConnection, req: CreateProductRequest) -> Result<product::Model> {
    catalog::create_product(db, req.name, req.image, req.category, req.amount).await
}

/// Returns one page of products with categories and current prices.
pub async fn get_products(
    db: &DatabaseConnection,
    req: GetProductsRequest,
) -> Result<GetProductsResponse> {
    let page = catalog::get_products(db, req.page, req.page_size).await?;
    Ok(GetProductsResponse {
        products: page.products.into_iter().map(Into::into).collect(),
        total_products: page.total_count,
    })
}

/// Returns every category, alphabetical (the product form's picker).
pub async fn get_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    catalog::list_all_categories(db).await
}

/// Updates a product, recording any price change in the price history.
pub async fn update(db: &DatabaseConnection, req: UpdateProductRequest) -> Result<product::Model> {
    catalog::update_product(db, req.id, req.name, req.image, req.category, req.amount).await
}

/// Toggles a product in or out of the register listing.
pub async fn update_status(
    db: &DatabaseConnection,
    req: UpdateStatusRequest,
) -> Result<product::Model> {
    catalog::set_product_status(db, req.id, &req.status).await
}

/// Fetches one product with its category and current price.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    req: GetProductByIdRequest,
) -> Result<Option<ProductDto>> {
    Ok(catalog::get_product_by_id(db, req.id).await?.map(Into::into))
}

/// Deletes a product.
pub async fn delete(db: &DatabaseConnection, req: DeleteProductRequest) -> Result<()> {
    catalog::delete_product(db, req.id).await
}
