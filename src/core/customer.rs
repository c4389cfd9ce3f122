//! Customer business logic - accounts, credit views, and payment history.

use crate::{
    core::DateRange,
    entities::{
        Customer, PaymentRecord, Transaction, customer, payment_record, payment_record_list,
        transaction,
    },
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Select, Set, prelude::*};

/// A customer with their total outstanding credit balance.
#[derive(Debug, Clone)]
pub struct CustomerSummary {
    /// The customer
    pub customer: customer::Model,
    /// Sum of `total_cost - total_paid` over the customer's unpaid credit sales
    pub outstanding: f64,
}

/// One page of customers.
#[derive(Debug, Clone)]
pub struct CustomerPage {
    /// Customers on this page, ordered by last name
    pub items: Vec<CustomerSummary>,
    /// Total number of customers across all pages
    pub total_count: u64,
}

/// One page of a customer's unpaid credit sales, oldest first.
#[derive(Debug, Clone)]
pub struct CreditView {
    /// Unpaid CREDIT transactions on this page
    pub transactions: Vec<transaction::Model>,
    /// Total outstanding balance over the whole range (not just this page)
    pub total_outstanding: f64,
    /// Total number of unpaid transactions in the range
    pub total_count: u64,
}

/// A payment record with its allocation lines.
#[derive(Debug, Clone)]
pub struct PaymentWithAllocations {
    /// The payment event
    pub payment: payment_record::Model,
    /// How the payment was split across transactions
    pub allocations: Vec<payment_record_list::Model>,
}

/// One page of a customer's payment history, newest first.
#[derive(Debug, Clone)]
pub struct HistoryView {
    /// Payments on this page with their allocations
    pub payments: Vec<PaymentWithAllocations>,
    /// Total number of payments in the range
    pub total_count: u64,
}

fn validate_identity(id: &str, first_name: &str, last_name: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::Config {
            message: "Customer id cannot be empty".to_string(),
        });
    }
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Customer name cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Creates a new customer account with a caller-assigned id (the school or
/// employee ID on the customer's card).
pub async fn create_customer(
    db: &DatabaseConnection,
    id: String,
    first_name: String,
    last_name: String,
    contact_number: String,
) -> Result<customer::Model> {
    validate_identity(&id, &first_name, &last_name)?;

    let model = customer::ActiveModel {
        id: Set(id.trim().to_string()),
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        contact_number: Set(contact_number),
        created_at: Set(chrono::Utc::now()),
    };
    model.insert(db).await.map_err(Into::into)
}

/// Updates a customer's name and contact number.
pub async fn update_customer(
    db: &DatabaseConnection,
    id: &str,
    first_name: String,
    last_name: String,
    contact_number: String,
) -> Result<customer::Model> {
    validate_identity(id, &first_name, &last_name)?;

    let existing = Customer::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CustomerNotFound { id: id.to_string() })?;

    let mut active: customer::ActiveModel = existing.into();
    active.first_name = Set(first_name.trim().to_string());
    active.last_name = Set(last_name.trim().to_string());
    active.contact_number = Set(contact_number);
    active.update(db).await.map_err(Into::into)
}

/// Retrieves a customer by id.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<customer::Model>> {
    Customer::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Deletes a customer account.
pub async fn delete_customer(db: &DatabaseConnection, id: &str) -> Result<()> {
    let existing = Customer::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CustomerNotFound { id: id.to_string() })?;

    existing.delete(db).await?;
    Ok(())
}

/// Returns every customer ordered by last name (the register's customer picker).
pub async fn list_all_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    Customer::find()
        .order_by_asc(customer::Column::LastName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns one page of customers ordered by last name, each with their
/// outstanding credit balance, plus the total customer count.
pub async fn list_customers(
    db: &DatabaseConnection,
    page: u64,
    items_per_page: u64,
) -> Result<CustomerPage> {
    let paginator = Customer::find()
        .order_by_asc(customer::Column::LastName)
        .paginate(db, items_per_page.max(1));

    let total_count = paginator.num_items().await?;
    let customers = paginator.fetch_page(page.saturating_sub(1)).await?;

    let mut items = Vec::with_capacity(customers.len());
    for customer in customers {
        let outstanding = outstanding_balance(db, &customer.id).await?;
        items.push(CustomerSummary {
            customer,
            outstanding,
        });
    }

    Ok(CustomerPage { items, total_count })
}

/// Computes a customer's total outstanding balance: the sum of
/// `total_cost - total_paid` over their unpaid CREDIT transactions.
pub async fn outstanding_balance(db: &DatabaseConnection, customer_id: &str) -> Result<f64> {
    let unpaid = unpaid_credit_query(customer_id, DateRange::default())
        .all(db)
        .await?;

    Ok(unpaid
        .iter()
        .map(|t| t.total_cost - t.total_paid)
        .sum())
}

fn unpaid_credit_query(customer_id: &str, range: DateRange) -> Select<Transaction> {
    let mut query = Transaction::find()
        .filter(transaction::Column::CustomerId.eq(customer_id))
        .filter(transaction::Column::TransactionType.eq(transaction::TYPE_CREDIT))
        .filter(transaction::Column::IsFullyPaid.eq(false))
        .order_by_asc(transaction::Column::CreatedAt)
        .order_by_asc(transaction::Column::Id);

    if let Some(from) = range.from {
        query = query.filter(transaction::Column::CreatedAt.gte(from));
    }
    if let Some(to) = range.to {
        query = query.filter(transaction::Column::CreatedAt.lte(to));
    }
    query
}

/// Returns one page of a customer's unpaid credit sales (oldest first) with
/// the total outstanding over the whole range. Feeds the pay dialog.
pub async fn customer_credit(
    db: &DatabaseConnection,
    customer_id: &str,
    page: u64,
    items_per_page: u64,
    range: DateRange,
) -> Result<CreditView> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: customer_id.to_string(),
        })?;

    let all_unpaid = unpaid_credit_query(customer_id, range).all(db).await?;
    let total_outstanding = all_unpaid
        .iter()
        .map(|t| t.total_cost - t.total_paid)
        .sum();
    let total_count = all_unpaid.len() as u64;

    let per_page = items_per_page.max(1) as usize;
    let offset = (page.saturating_sub(1) as usize) * per_page;
    let transactions = all_unpaid.into_iter().skip(offset).take(per_page).collect();

    Ok(CreditView {
        transactions,
        total_outstanding,
        total_count,
    })
}

/// Returns one page of a customer's payment history (newest first), each
/// payment with its allocation lines.
pub async fn customer_history(
    db: &DatabaseConnection,
    customer_id: &str,
    page: u64,
    items_per_page: u64,
    range: DateRange,
) -> Result<HistoryView> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: customer_id.to_string(),
        })?;

    let mut query = PaymentRecord::find()
        .filter(payment_record::Column::CustomerId.eq(customer_id))
        .order_by_desc(payment_record::Column::CreatedAt)
        .order_by_desc(payment_record::Column::Id);

    if let Some(from) = range.from {
        query = query.filter(payment_record::Column::CreatedAt.gte(from));
    }
    if let Some(to) = range.to {
        query = query.filter(payment_record::Column::CreatedAt.lte(to));
    }

    let paginator = query.paginate(db, items_per_page.max(1));
    let total_count = paginator.num_items().await?;
    let records = paginator.fetch_page(page.saturating_sub(1)).await?;

    let mut payments = Vec::with_capacity(records.len());
    for payment in records {
        let allocations = payment
            .find_related(crate::entities::PaymentRecordList)
            .all(db)
            .await?;
        payments.push(PaymentWithAllocations {
            payment,
            allocations,
        });
    }

    Ok(HistoryView {
        payments,
        total_count,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_customer_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_customer(
            &db,
            String::new(),
            "Ana".to_string(),
            "Reyes".to_string(),
            String::new(),
        )
        .await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = create_customer(
            &db,
            "C-001".to_string(),
            " ".to_string(),
            "Reyes".to_string(),
            String::new(),
        )
        .await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_crud_roundtrip() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_customer(
            &db,
            "C-001".to_string(),
            "Ana".to_string(),
            "Reyes".to_string(),
            "09170000000".to_string(),
        )
        .await?;
        assert_eq!(created.id, "C-001");

        let updated = update_customer(
            &db,
            "C-001",
            "Ana Maria".to_string(),
            "Reyes".to_string(),
            "09171111111".to_string(),
        )
        .await?;
        assert_eq!(updated.first_name, "Ana Maria");
        assert_eq!(updated.contact_number, "09171111111");

        let fetched = get_customer_by_id(&db, "C-001").await?.unwrap();
        assert_eq!(fetched, updated);

        delete_customer(&db, "C-001").await?;
        assert!(get_customer_by_id(&db, "C-001").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_customers_with_outstanding() -> Result<()> {
        let (db, customer, _t1, _t2) = setup_with_two_debts(100.0, 50.0).await?;
        create_test_customer(&db, "C-900").await?;

        let page = list_customers(&db, 1, 10).await?;
        assert_eq!(page.total_count, 2);

        let with_debt = page
            .items
            .iter()
            .find(|s| s.customer.id == customer.id)
            .unwrap();
        assert_eq!(with_debt.outstanding, 150.0);

        let without_debt = page
            .items
            .iter()
            .find(|s| s.customer.id == "C-900")
            .unwrap();
        assert_eq!(without_debt.outstanding, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_outstanding_shrinks_after_payment() -> Result<()> {
        let (db, customer, _t1, _t2) = setup_with_two_debts(100.0, 50.0).await?;

        assert_eq!(outstanding_balance(&db, &customer.id).await?, 150.0);

        crate::core::ledger::apply_payment(&db, &customer.id, 120.0).await?;
        assert_eq!(outstanding_balance(&db, &customer.id).await?, 30.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_credit_view() -> Result<()> {
        let (db, customer, t1, t2) = setup_with_two_debts(100.0, 50.0).await?;

        let view = customer_credit(&db, &customer.id, 1, 10, DateRange::default()).await?;
        assert_eq!(view.total_count, 2);
        assert_eq!(view.total_outstanding, 150.0);
        // Oldest first
        assert_eq!(view.transactions[0].id, t1.id);
        assert_eq!(view.transactions[1].id, t2.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_history_newest_first() -> Result<()> {
        let (db, customer, _t1, _t2) = setup_with_two_debts(100.0, 50.0).await?;

        crate::core::ledger::apply_payment(&db, &customer.id, 30.0).await?;
        crate::core::ledger::apply_payment(&db, &customer.id, 120.0).await?;

        let view = customer_history(&db, &customer.id, 1, 10, DateRange::default()).await?;
        assert_eq!(view.total_count, 2);
        assert_eq!(view.payments[0].payment.amount, 120.0);
        // The second payment settled T1 (70 outstanding) and touched T2
        assert_eq!(view.payments[0].allocations.len(), 2);
        assert_eq!(view.payments[1].payment.amount, 30.0);
        assert_eq!(view.payments[1].allocations.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_credit_date_range() -> Result<()> {
        // Debts 60 seconds apart; windows must cut on created_at inclusively
        let (db, customer, t1, t2) = setup_with_two_debts(100.0, 50.0).await?;

        let only_older = DateRange {
            from: None,
            to: Some(t1.created_at),
        };
        let view = customer_credit(&db, &customer.id, 1, 10, only_older).await?;
        assert_eq!(view.total_count, 1);
        assert_eq!(view.transactions[0].id, t1.id);
        assert_eq!(view.total_outstanding, 100.0);

        let only_newer = DateRange {
            from: Some(t2.created_at),
            to: None,
        };
        let view = customer_credit(&db, &customer.id, 1, 10, only_newer).await?;
        assert_eq!(view.total_count, 1);
        assert_eq!(view.transactions[0].id, t2.id);
        assert_eq!(view.total_outstanding, 50.0);

        let covers_both = DateRange {
            from: Some(t1.created_at),
            to: Some(t2.created_at),
        };
        let view = customer_credit(&db, &customer.id, 1, 10, covers_both).await?;
        assert_eq!(view.total_count, 2);
        assert_eq!(view.total_outstanding, 150.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_history_date_range() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "C-001").await?;

        // Two payment events a minute apart, inserted directly since the
        // range filter only looks at created_at
        let now = chrono::Utc::now();
        let older = payment_record::ActiveModel {
            customer_id: Set(customer.id.clone()),
            amount: Set(30.0),
            created_at: Set(now - chrono::Duration::seconds(60)),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        let newer = payment_record::ActiveModel {
            customer_id: Set(customer.id.clone()),
            amount: Set(70.0),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let only_older = DateRange {
            from: None,
            to: Some(older.created_at),
        };
        let view = customer_history(&db, &customer.id, 1, 10, only_older).await?;
        assert_eq!(view.total_count, 1);
        assert_eq!(view.payments[0].payment.id, older.id);

        let only_newer = DateRange {
            from: Some(newer.created_at),
            to: None,
        };
        let view = customer_history(&db, &customer.id, 1, 10, only_newer).await?;
        assert_eq!(view.total_count, 1);
        assert_eq!(view.payments[0].payment.id, newer.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_views_unknown_customer() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(matches!(
            customer_credit(&db, "C-404", 1, 10, DateRange::default()).await,
            Err(Error::CustomerNotFound { .. })
        ));
        assert!(matches!(
            customer_history(&db, "C-404", 1, 10, DateRange::default()).await,
            Err(Error::CustomerNotFound { .. })
        ));

        Ok(())
    }
}
