//! Database configuration module for the canteen POS core.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    Admin, Cashier, Category, Customer, Order, PaymentRecord, PaymentRecordList, Product,
    ProductPriceHistory, StockHistory, Transaction,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/canteen_pos.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(&get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct
/// definitions. It creates the full canteen schema: catalog, histories, actors, and ledger.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let category_table = schema.create_table_from_entity(Category);
    let product_table = schema.create_table_from_entity(Product);
    let price_history_table = schema.create_table_from_entity(ProductPriceHistory);
    let stock_history_table = schema.create_table_from_entity(StockHistory);
    let customer_table = schema.create_table_from_entity(Customer);
    let cashier_table = schema.create_table_from_entity(Cashier);
    let admin_table = schema.create_table_from_entity(Admin);
    let transaction_table = schema.create_table_from_entity(Transaction);
    let order_table = schema.create_table_from_entity(Order);
    let payment_record_table = schema.create_table_from_entity(PaymentRecord);
    let payment_record_list_table = schema.create_table_from_entity(PaymentRecordList);

    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&price_history_table)).await?;
    db.execute(builder.build(&stock_history_table)).await?;
    db.execute(builder.build(&customer_table)).await?;
    db.execute(builder.build(&cashier_table)).await?;
    db.execute(builder.build(&admin_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&payment_record_table)).await?;
    db.execute(builder.build(&payment_record_list_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        category::Model as CategoryModel, customer::Model as CustomerModel,
        payment_record::Model as PaymentRecordModel, product::Model as ProductModel,
        transaction::Model as TransactionModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // Use in-memory database for testing to avoid schema conflicts with existing database
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<CustomerModel> = Customer::find().limit(1).all(&db).await?;
        let _: Vec<TransactionModel> = Transaction::find().limit(1).all(&db).await?;
        let _: Vec<PaymentRecordModel> = PaymentRecord::find().limit(1).all(&db).await?;

        Ok(())
    }
}
