//! Employee business logic - cashier account management.

use crate::{
    entities::{Cashier, Transaction, cashier, transaction},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// A cashier with every transaction they have recorded.
#[derive(Debug, Clone)]
pub struct CashierOverview {
    /// The cashier
    pub cashier: cashier::Model,
    /// Transactions recorded by this cashier, newest first
    pub transactions: Vec<transaction::Model>,
}

/// Creates a new cashier account.
///
/// # Errors
/// Returns an error if any field is empty or the username is already taken.
pub async fn create_cashier(
    db: &DatabaseConnection,
    username: String,
    password: String,
    first_name: String,
    last_name: String,
) -> Result<cashier::Model> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(Error::Config {
            message: "Cashier username and password cannot be empty".to_string(),
        });
    }
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Cashier name cannot be empty".to_string(),
        });
    }

    let username = username.trim().to_string();
    let existing = Cashier::find()
        .filter(cashier::Column::Username.eq(username.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::UsernameTaken { username });
    }

    let model = cashier::ActiveModel {
        username: Set(username),
        password: Set(password),
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a cashier by id.
pub async fn get_cashier_by_id(
    db: &DatabaseConnection,
    cashier_id: i32,
) -> Result<Option<cashier::Model>> {
    Cashier::find_by_id(cashier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns every cashier ordered by last name, each with the transactions
/// they have recorded (newest first).
pub async fn list_cashiers(db: &DatabaseConnection) -> Result<Vec<CashierOverview>> {
    let cashiers = Cashier::find()
        .order_by_asc(cashier::Column::LastName)
        .all(db)
        .await?;

    let mut overviews = Vec::with_capacity(cashiers.len());
    for cashier in cashiers {
        let transactions = Transaction::find()
            .filter(transaction::Column::CashierId.eq(cashier.id))
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .all(db)
            .await?;
        overviews.push(CashierOverview {
            cashier,
            transactions,
        });
    }

    Ok(overviews)
}
