//! Catalog business logic - categories and products.
//!
//! Provides CRUD operations for the product catalog. Creating a product also
//! appends its first price-history row so the product is immediately sellable;
//! later price changes go through [`crate::core::inventory::set_price`] and
//! never touch existing rows.

use crate::{
    entities::{Category, Product, category, product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};

/// One page of categories.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    /// Categories on this page, alphabetical
    pub categories: Vec<category::Model>,
    /// Total number of categories across all pages
    pub total_count: u64,
}

/// A product with its category and current price, as listed in the back office.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// The product
    pub product: product::Model,
    /// The product's category, if the row still exists
    pub category: Option<category::Model>,
    /// Current unit price (0.0 if the product has no price history)
    pub price: f64,
}

/// One page of catalog entries.
#[derive(Debug, Clone)]
pub struct ProductPage {
    /// Products on this page, alphabetical
    pub products: Vec<CatalogEntry>,
    /// Total number of products across all pages
    pub total_count: u64,
}

/// Creates a new category.
///
/// # Errors
/// Returns an error if the name is empty or whitespace-only.
pub async fn create_category(db: &DatabaseConnection, name: String) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let model = category::ActiveModel {
        name: Set(name.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Returns one page of categories ordered by name, with the total count.
pub async fn list_categories(
    db: &DatabaseConnection,
    page: u64,
    items_per_page: u64,
) -> Result<CategoryPage> {
    let paginator = Category::find()
        .order_by_asc(category::Column::Name)
        .paginate(db, items_per_page.max(1));

    let total_count = paginator.num_items().await?;
    let categories = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok(CategoryPage {
        categories,
        total_count,
    })
}

/// Returns every category ordered by name, for selection lists.
pub async fn list_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renames an existing category.
pub async fn rename_category(
    db: &DatabaseConnection,
    category_id: i32,
    name: String,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let existing = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    let mut active: category::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.update(db).await.map_err(Into::into)
}

/// Deletes a category.
pub async fn delete_category(db: &DatabaseConnection, category_id: i32) -> Result<()> {
    let existing = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    existing.delete(db).await?;
    Ok(())
}

/// Creates a new product and appends its first price-history row.
///
/// Both writes happen in one database transaction so a product can never be
/// observed without a starting price.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is non-positive or not finite
/// - The category does not exist
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    image_url: String,
    category_id: i32,
    price: f64,
) -> Result<product::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if !price.is_finite() || price <= 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }

    let txn = db.begin().await?;

    Category::find_by_id(category_id)
        .one(&txn)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    let model = product::ActiveModel {
        name: Set(name.trim().to_string()),
        image_url: Set(image_url),
        category_id: Set(category_id),
        status: Set(product::STATUS_AVAILABLE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = model.insert(&txn).await?;

    crate::core::inventory::set_price(&txn, created.id, price).await?;

    txn.commit().await?;
    Ok(created)
}

/// Returns one page of products ordered by name, each with its category and
/// current price, plus the total product count.
pub async fn get_products(
    db: &DatabaseConnection,
    page: u64,
    page_size: u64,
) -> Result<ProductPage> {
    let paginator = Product::find()
        .find_also_related(Category)
        .order_by_asc(product::Column::Name)
        .paginate(db, page_size.max(1));

    let total_count = paginator.num_items().await?;
    let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

    let mut products = Vec::with_capacity(rows.len());
    for (product, category) in rows {
        let price = crate::core::inventory::current_price(db, product.id).await?;
        products.push(CatalogEntry {
            product,
            category,
            price,
        });
    }

    Ok(ProductPage {
        products,
        total_count,
    })
}

/// Retrieves a product by id together with its category.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i32,
) -> Result<Option<CatalogEntry>> {
    let Some((product, category)) = Product::find_by_id(product_id)
        .find_also_related(Category)
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let price = crate::core::inventory::current_price(db, product.id).await?;
    Ok(Some(CatalogEntry {
        product,
        category,
        price,
    }))
}

/// Updates a product's name, image, and category; a changed price is recorded
/// as a new price-history row rather than an in-place edit.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i32,
    name: String,
    image_url: String,
    category_id: i32,
    price: Option<f64>,
) -> Result<product::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let existing = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    Category::find_by_id(category_id)
        .one(&txn)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.image_url = Set(image_url);
    active.category_id = Set(category_id);
    let updated = active.update(&txn).await?;

    if let Some(amount) = price {
        let current = crate::core::inventory::current_price(&txn, product_id).await?;
        if amount != current {
            crate::core::inventory::set_price(&txn, product_id, amount).await?;
        }
    }

    txn.commit().await?;
    Ok(updated)
}

/// Toggles a product in or out of the register listing.
///
/// # Errors
/// Returns an error if the status string is not one of the two known values
/// or the product does not exist.
pub async fn set_product_status(
    db: &DatabaseConnection,
    product_id: i32,
    status: &str,
) -> Result<product::Model> {
    if status != product::STATUS_AVAILABLE && status != product::STATUS_NOT_AVAILABLE {
        return Err(Error::Config {
            message: format!("Unknown product status: {status}"),
        });
    }

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let mut active: product::ActiveModel = existing.into();
    active.status = Set(status.to_string());
    active.update(db).await.map_err(Into::into)
}

/// Deletes a product.
pub async fn delete_product(db: &DatabaseConnection, product_id: i32) -> Result<()> {
    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    existing.delete(db).await?;
    Ok(())
}
