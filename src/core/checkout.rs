//! Checkout business logic - recording cash and credit sales.
//!
//! A sale is one transaction row plus one order line per product, each line
//! pinned to the price-history row current at sale time, plus one negative
//! stock delta per line. Everything is written in a single database
//! transaction so a failed write never leaves a half-recorded sale.

use crate::{
    entities::{
        Cashier, Customer, Product, order, payment_record, payment_record_list, stock_history,
        transaction,
        transaction::{TYPE_CASH, TYPE_CREDIT},
    },
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// One product line of an incoming sale.
#[derive(Debug, Clone, Copy)]
pub struct OrderLineInput {
    /// Product to sell
    pub product_id: i32,
    /// Units to sell, must be positive
    pub quantity: i32,
}

/// Result of recording a sale.
#[derive(Debug, Clone)]
pub struct SaleOutcome {
    /// The recorded transaction
    pub transaction: transaction::Model,
    /// The recorded order lines
    pub lines: Vec<order::Model>,
    /// Cash handed back to the customer (tendered minus cost; 0.0 for credit)
    pub change: f64,
}

/// Records a sale rung up by a cashier.
///
/// The total cost is computed server-side from the current price of each
/// product; the snapshot row id is stored on every order line. For CASH sales
/// the tendered amount must cover the cost, `total_paid` is set to the cost,
/// and the difference comes back as change; a CASH sale attributed to a
/// customer also writes a payment record so it shows up in the customer's
/// payment history. For CREDIT sales `total_paid` starts at zero and the
/// transaction becomes eligible for settlement via
/// [`crate::core::ledger::apply_payment`].
///
/// # Errors
/// Returns an error if:
/// - The line list is empty or any quantity is non-positive
/// - The transaction type is unknown, or CREDIT without a customer
/// - The cashier, customer, or any product does not exist
/// - Any product has no price history to snapshot
/// - A CASH tender does not cover the computed cost
pub async fn create_sale(
    db: &DatabaseConnection,
    cashier_id: i32,
    customer_id: Option<String>,
    transaction_type: &str,
    tendered: f64,
    lines: &[OrderLineInput],
) -> Result<SaleOutcome> {
    if lines.is_empty() {
        return Err(Error::EmptyOrder);
    }
    for line in lines {
        if line.quantity <= 0 {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity,
            });
        }
    }

    if transaction_type != TYPE_CASH && transaction_type != TYPE_CREDIT {
        return Err(Error::UnknownTransactionType {
            value: transaction_type.to_string(),
        });
    }
    if transaction_type == TYPE_CREDIT && customer_id.is_none() {
        return Err(Error::CreditWithoutCustomer);
    }
    if !tendered.is_finite() || tendered < 0.0 {
        return Err(Error::InvalidAmount { amount: tendered });
    }

    let txn = db.begin().await?;

    Cashier::find_by_id(cashier_id)
        .one(&txn)
        .await?
        .ok_or(Error::CashierNotFound { id: cashier_id })?;

    if let Some(id) = customer_id.as_deref() {
        Customer::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::CustomerNotFound { id: id.to_string() })?;
    }

    // Resolve the price snapshot for every line and compute the total cost
    let mut snapshots = Vec::with_capacity(lines.len());
    let mut total_cost = 0.0;
    for line in lines {
        Product::find_by_id(line.product_id)
            .one(&txn)
            .await?
            .ok_or(Error::ProductNotFound {
                id: line.product_id,
            })?;

        let price_row = crate::core::inventory::current_price_row(&txn, line.product_id)
            .await?
            .ok_or(Error::ProductUnpriced {
                id: line.product_id,
            })?;

        total_cost += price_row.amount * f64::from(line.quantity);
        snapshots.push((line, price_row));
    }

    let is_cash = transaction_type == TYPE_CASH;
    let change = if is_cash {
        if tendered < total_cost {
            return Err(Error::InsufficientPayment {
                tendered,
                required: total_cost,
            });
        }
        tendered - total_cost
    } else {
        0.0
    };

    let now = chrono::Utc::now();
    let transaction_model = transaction::ActiveModel {
        cashier_id: Set(cashier_id),
        customer_id: Set(customer_id.clone()),
        transaction_type: Set(transaction_type.to_string()),
        total_cost: Set(total_cost),
        total_paid: Set(if is_cash { total_cost } else { 0.0 }),
        is_fully_paid: Set(is_cash),
        created_at: Set(now),
        ..Default::default()
    };
    let created = transaction_model.insert(&txn).await?;

    let mut recorded_lines = Vec::with_capacity(lines.len());
    for (line, price_row) in snapshots {
        let order_model = order::ActiveModel {
            transaction_id: Set(created.id),
            product_id: Set(line.product_id),
            product_price_id: Set(price_row.id),
            quantity: Set(line.quantity),
            ..Default::default()
        };
        recorded_lines.push(order_model.insert(&txn).await?);

        let stock_model = stock_history::ActiveModel {
            product_id: Set(line.product_id),
            quantity: Set(-line.quantity),
            created_at: Set(now),
            ..Default::default()
        };
        stock_model.insert(&txn).await?;
    }

    // An attributed cash sale is both a sale and a payment event
    if is_cash && let Some(id) = customer_id {
        let payment = payment_record::ActiveModel {
            customer_id: Set(id),
            amount: Set(total_cost),
            created_at: Set(now),
            ..Default::default()
        };
        let payment = payment.insert(&txn).await?;

        let allocation = payment_record_list::ActiveModel {
            payment_record_id: Set(payment.id),
            transaction_id: Set(created.id),
            amount: Set(total_cost),
            ..Default::default()
        };
        allocation.insert(&txn).await?;
    }

    txn.commit().await?;

    info!(
        transaction_id = created.id,
        transaction_type,
        total_cost,
        lines = recorded_lines.len(),
        "Recorded sale"
    );

    Ok(SaleOutcome {
        transaction: created,
        lines: recorded_lines,
        change,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{PaymentRecord, PaymentRecordList};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_sale_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_sale(&db, 1, None, TYPE_CASH, 10.0, &[]).await;
        assert!(matches!(result, Err(Error::EmptyOrder)));

        let lines = [OrderLineInput {
            product_id: 1,
            quantity: 0,
        }];
        let result = create_sale(&db, 1, None, TYPE_CASH, 10.0, &lines).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: 0 })));

        let lines = [OrderLineInput {
            product_id: 1,
            quantity: 1,
        }];
        let result = create_sale(&db, 1, None, "BARTER", 10.0, &lines).await;
        assert!(matches!(result, Err(Error::UnknownTransactionType { .. })));

        let result = create_sale(&db, 1, None, TYPE_CREDIT, 0.0, &lines).await;
        assert!(matches!(result, Err(Error::CreditWithoutCustomer)));

        Ok(())
    }

    #[tokio::test]
    async fn test_cash_sale_snapshots_price_and_decrements_stock() -> Result<()> {
        let mut fixture = setup_register().await?;
        let db = &fixture.db;
        let product = fixture.products.remove(0);

        crate::core::inventory::record_stock(db, product.id, 20).await?;

        let lines = [OrderLineInput {
            product_id: product.id,
            quantity: 3,
        }];
        let outcome = create_sale(db, fixture.cashier.id, None, TYPE_CASH, 50.0, &lines).await?;

        // Factory price is 10.0; 3 units cost 30, tendered 50, change 20
        assert_eq!(outcome.transaction.total_cost, 30.0);
        assert_eq!(outcome.transaction.total_paid, 30.0);
        assert!(outcome.transaction.is_fully_paid);
        assert_eq!(outcome.change, 20.0);
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(outcome.lines[0].quantity, 3);

        assert_eq!(
            crate::core::inventory::current_quantity(db, product.id).await?,
            17
        );

        // The line pins the price row that was current at sale time
        let pinned_price = crate::entities::ProductPriceHistory::find_by_id(
            outcome.lines[0].product_price_id,
        )
        .one(db)
        .await?
        .unwrap();
        assert_eq!(pinned_price.amount, 10.0);

        // A later price change must not affect the recorded sale
        crate::core::inventory::set_price(db, product.id, 99.0).await?;
        let reloaded = crate::entities::Transaction::find_by_id(outcome.transaction.id)
            .one(db)
            .await?
            .unwrap();
        assert_eq!(reloaded.total_cost, 30.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_cash_sale_insufficient_tender() -> Result<()> {
        let mut fixture = setup_register().await?;
        let product = fixture.products.remove(0);

        let lines = [OrderLineInput {
            product_id: product.id,
            quantity: 2,
        }];
        let result = create_sale(
            &fixture.db,
            fixture.cashier.id,
            None,
            TYPE_CASH,
            15.0,
            &lines,
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::InsufficientPayment {
                tendered: 15.0,
                required: 20.0
            })
        ));

        // Nothing was written
        assert_eq!(
            crate::entities::Transaction::find().all(&fixture.db).await?.len(),
            0
        );
        assert_eq!(
            crate::core::inventory::current_quantity(&fixture.db, product.id).await?,
            0
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_credit_sale_opens_unpaid_transaction() -> Result<()> {
        let mut fixture = setup_register().await?;
        let product = fixture.products.remove(0);
        let customer = create_test_customer(&fixture.db, "C-001").await?;

        let lines = [OrderLineInput {
            product_id: product.id,
            quantity: 4,
        }];
        let outcome = create_sale(
            &fixture.db,
            fixture.cashier.id,
            Some(customer.id.clone()),
            TYPE_CREDIT,
            0.0,
            &lines,
        )
        .await?;

        assert_eq!(outcome.transaction.total_cost, 40.0);
        assert_eq!(outcome.transaction.total_paid, 0.0);
        assert!(!outcome.transaction.is_fully_paid);
        assert_eq!(outcome.transaction.customer_id, Some(customer.id));
        assert_eq!(outcome.change, 0.0);

        // Credit sales never write payment records
        assert_eq!(PaymentRecord::find().all(&fixture.db).await?.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_attributed_cash_sale_writes_payment_record() -> Result<()> {
        let mut fixture = setup_register().await?;
        let product = fixture.products.remove(0);
        let customer = create_test_customer(&fixture.db, "C-001").await?;

        let lines = [OrderLineInput {
            product_id: product.id,
            quantity: 2,
        }];
        let outcome = create_sale(
            &fixture.db,
            fixture.cashier.id,
            Some(customer.id.clone()),
            TYPE_CASH,
            20.0,
            &lines,
        )
        .await?;

        let payments = PaymentRecord::find().all(&fixture.db).await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].customer_id, customer.id);
        assert_eq!(payments[0].amount, 20.0);

        let allocations = PaymentRecordList::find().all(&fixture.db).await?;
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].transaction_id, outcome.transaction.id);
        assert_eq!(allocations[0].amount, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_sale_with_unpriced_product() -> Result<()> {
        let fixture = setup_register().await?;
        let unpriced = create_unpriced_product(
            &fixture.db,
            "Unpriced",
            fixture.category.id,
        )
        .await?;

        let lines = [OrderLineInput {
            product_id: unpriced.id,
            quantity: 1,
        }];
        let result = create_sale(
            &fixture.db,
            fixture.cashier.id,
            None,
            TYPE_CASH,
            100.0,
            &lines,
        )
        .await;

        assert!(matches!(result, Err(Error::ProductUnpriced { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_sale_with_unknown_cashier() -> Result<()> {
        let mut fixture = setup_register().await?;
        let product = fixture.products.remove(0);

        let lines = [OrderLineInput {
            product_id: product.id,
            quantity: 1,
        }];
        let result = create_sale(&fixture.db, 999, None, TYPE_CASH, 10.0, &lines).await;
        assert!(matches!(result, Err(Error::CashierNotFound { id: 999 })));

        Ok(())
    }
}
