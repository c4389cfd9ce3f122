//! Cashier account management operations.

use crate::{
    core::employee,
    entities::{cashier, transaction},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Request to create a cashier account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCashierRequest {
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// A cashier with the transactions they recorded.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDto {
    /// The cashier row
    pub cashier: cashier::Model,
    /// Transactions recorded by this cashier, newest first
    pub transactions: Vec<transaction::Model>,
}

/// Creates a cashier account.
pub async fn create(db: &DatabaseConnection, req: CreateCashierRequest) -> Result<cashier::Model> {
    employee::create_cashier(db, req.username, req.password, req.first_name, req.last_name).await
}

/// Returns every cashier with their recorded transactions, by last name.
pub async fn get_employees(db: &DatabaseConnection) -> Result<Vec<EmployeeDto>> {
    let overviews = employee::list_cashiers(db).await?;
    Ok(overviews
        .into_iter()
        .map(|overview| EmployeeDto {
            cashier: overview.cashier,
            transactions: overview.transactions,
        })
        .collect())
}
