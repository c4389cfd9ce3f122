//! Shared test utilities for the canteen POS core.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::catalog,
    entities::{self, cashier, customer, product, transaction},
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Default price every factory-made product starts with.
pub const TEST_PRICE: f64 = 10.0;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test category.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    catalog::create_category(db, name.to_string()).await
}

/// Creates a test product priced at [`TEST_PRICE`] with a placeholder image.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i32,
) -> Result<product::Model> {
    catalog::create_product(
        db,
        name.to_string(),
        format!("https://img.example/{}.png", name.to_lowercase().replace(' ', "-")),
        category_id,
        TEST_PRICE,
    )
    .await
}

/// Inserts a product row directly, bypassing the catalog so it has no
/// price history. Used to exercise the unpriced-product paths.
pub async fn create_unpriced_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i32,
) -> Result<product::Model> {
    let model = product::ActiveModel {
        name: Set(name.to_string()),
        image_url: Set(String::new()),
        category_id: Set(category_id),
        status: Set(product::STATUS_AVAILABLE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates a test customer with the given id and placeholder details.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    id: &str,
) -> Result<customer::Model> {
    crate::core::customer::create_customer(
        db,
        id.to_string(),
        "Test".to_string(),
        "Customer".to_string(),
        "09170000000".to_string(),
    )
    .await
}

/// Creates a test cashier account.
pub async fn create_test_cashier(db: &DatabaseConnection) -> Result<cashier::Model> {
    crate::core::employee::create_cashier(
        db,
        "testcashier".to_string(),
        "password".to_string(),
        "Test".to_string(),
        "Cashier".to_string(),
    )
    .await
}

/// A ready-to-sell register: one cashier and one priced, stocked-out product
/// in one category.
pub struct RegisterFixture {
    /// In-memory database
    pub db: DatabaseConnection,
    /// Cashier who rings up test sales
    pub cashier: cashier::Model,
    /// Category holding the test products
    pub category: entities::category::Model,
    /// Products priced at [`TEST_PRICE`]
    pub products: Vec<product::Model>,
}

/// Sets up a register fixture with one priced product ("Iced Tea", 10.0).
pub async fn setup_register() -> Result<RegisterFixture> {
    let db = setup_test_db().await?;
    let cashier = create_test_cashier(&db).await?;
    let category = create_test_category(&db, "Drinks").await?;
    let product = create_test_product(&db, "Iced Tea", category.id).await?;
    Ok(RegisterFixture {
        db,
        cashier,
        category,
        products: vec![product],
    })
}

/// Sets up a test environment with a category and one priced product.
/// Returns (db, category, product) for catalog and inventory tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::category::Model,
    product::Model,
)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Drinks").await?;
    let product = create_test_product(&db, "Iced Tea", category.id).await?;
    Ok((db, category, product))
}

/// Inserts an unpaid CREDIT transaction directly, bypassing checkout.
/// Used by ledger tests that only care about the cost/paid columns.
pub async fn insert_credit_debt(
    db: &DatabaseConnection,
    cashier_id: i32,
    customer_id: &str,
    total_cost: f64,
    created_at: sea_orm::entity::prelude::DateTimeUtc,
) -> Result<transaction::Model> {
    let model = transaction::ActiveModel {
        cashier_id: Set(cashier_id),
        customer_id: Set(Some(customer_id.to_string())),
        transaction_type: Set(transaction::TYPE_CREDIT.to_string()),
        total_cost: Set(total_cost),
        total_paid: Set(0.0),
        is_fully_paid: Set(false),
        created_at: Set(created_at),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Sets up a customer with two unpaid credit transactions, the first created
/// a minute before the second. Returns (db, customer, older, newer).
pub async fn setup_with_two_debts(
    cost_older: f64,
    cost_newer: f64,
) -> Result<(
    DatabaseConnection,
    customer::Model,
    transaction::Model,
    transaction::Model,
)> {
    let db = setup_test_db().await?;
    let cashier = create_test_cashier(&db).await?;
    let customer = create_test_customer(&db, "C-001").await?;

    let now = chrono::Utc::now();
    let older = insert_credit_debt(
        &db,
        cashier.id,
        &customer.id,
        cost_older,
        now - chrono::Duration::seconds(60),
    )
    .await?;
    let newer = insert_credit_debt(&db, cashier.id, &customer.id, cost_newer, now).await?;

    Ok((db, customer, older, newer))
}
