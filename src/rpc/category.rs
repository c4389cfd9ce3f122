//! Category management operations.

use crate::{
    core::catalog,
    entities::category,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Request to create a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name
    pub name: String,
}

/// Request for one page of categories.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetCategoriesRequest {
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub items_per_page: u64,
}

/// One page of categories.
#[derive(Debug, Clone, Serialize)]
pub struct GetCategoriesResponse {
    /// Categories on this page
    pub categories: Vec<category::Model>,
    /// Total category count
    pub total_count: u64,
}

/// Request to rename a category.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryRequest {
    /// Category to rename
    pub id: i32,
    /// New name
    pub name: String,
}

/// Request to delete a category.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteCategoryRequest {
    /// Category to delete
    pub id: i32,
}

/// Creates a category.
pub async fn create(
    db: &DatabaseConnection,
    req: CreateCategoryRequest,
) -> Result<category::Model> {
    catalog::create_category(db, req.name).await
}

/// Returns one page of categories with the total count.
pub async fn get_categories(
    db: &DatabaseConnection,
    req: GetCategoriesRequest,
) -> Result<GetCategoriesResponse> {
    let page = catalog::list_categories(db, req.page, req.items_per_page).await?;
    Ok(GetCategoriesResponse {
        categories: page.categories,
        total_count: page.total_count,
    })
}

/// Renames a category.
pub async fn update_category(
    db: &DatabaseConnection,
    req: UpdateCategoryRequest,
) -> Result<category::Model> {
    catalog::rename_category(db, req.id, req.name).await
}

/// Deletes a category.
pub async fn delete_category(db: &DatabaseConnection, req: DeleteCategoryRequest) -> Result<()> {
    catalog::delete_category(db, req.id).await
}
