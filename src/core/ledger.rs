//! Credit ledger business logic - FIFO payment allocation.
//!
//! A payment from a customer is applied against that customer's unpaid CREDIT
//! transactions, oldest first, until the payment runs out or every debt is
//! settled. Each call writes one payment record plus one allocation line per
//! transaction touched, all inside a single database transaction, so a failed
//! write rolls back the whole pass. Anything left over after every debt is
//! settled is handed back to the caller as change and never enters the ledger.

use crate::{
    entities::{Customer, Transaction, payment_record, payment_record_list, transaction},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// One transaction touched by a payment pass.
#[derive(Debug, Clone)]
pub struct Allocation {
    /// The transaction after the payment was applied
    pub transaction: transaction::Model,
    /// Amount of this payment applied to the transaction
    pub amount: f64,
}

/// Result of applying one payment.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// The payment record, or None when the customer had nothing outstanding
    pub payment: Option<payment_record::Model>,
    /// Transactions touched, oldest first
    pub allocations: Vec<Allocation>,
    /// Unallocated remainder returned to the customer
    pub remaining: f64,
}

impl PaymentOutcome {
    /// Total amount actually applied to the ledger by this payment.
    #[must_use]
    pub fn total_applied(&self) -> f64 {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}

/// Applies a single payment against a customer's outstanding credit.
///
/// Unpaid CREDIT transactions are settled oldest-first: each one is either
/// fully settled (its outstanding balance `total_cost - total_paid` is
/// deducted from the payment) or, when the payment no longer covers a full
/// balance, partially paid and the pass stops. A customer with no unpaid
/// transactions is a no-op success: no rows are written and the full amount
/// comes back as `remaining`.
///
/// # Errors
/// Returns an error if the amount is non-positive or not finite, or the
/// customer does not exist. Database failures roll back every write of the
/// pass.
pub async fn apply_payment(
    db: &DatabaseConnection,
    customer_id: &str,
    amount: f64,
) -> Result<PaymentOutcome> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let txn = db.begin().await?;

    Customer::find_by_id(customer_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::CustomerNotFound {
            id: customer_id.to_string(),
        })?;

    // Oldest debt first; id breaks ties between sales in the same instant
    let unpaid = Transaction::find()
        .filter(transaction::Column::CustomerId.eq(customer_id))
        .filter(transaction::Column::TransactionType.eq(transaction::TYPE_CREDIT))
        .filter(transaction::Column::IsFullyPaid.eq(false))
        .order_by_asc(transaction::Column::CreatedAt)
        .order_by_asc(transaction::Column::Id)
        .all(&txn)
        .await?;

    if unpaid.is_empty() {
        txn.commit().await?;
        return Ok(PaymentOutcome {
            payment: None,
            allocations: Vec::new(),
            remaining: amount,
        });
    }

    let payment = payment_record::ActiveModel {
        customer_id: Set(customer_id.to_string()),
        amount: Set(amount),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let payment = payment.insert(&txn).await?;

    let mut remaining = amount;
    let mut allocations = Vec::new();

    for debt in unpaid {
        if remaining <= 0.0 {
            break;
        }

        let outstanding = debt.total_cost - debt.total_paid;
        if outstanding <= 0.0 {
            continue;
        }

        let applied = if remaining >= outstanding {
            outstanding
        } else {
            remaining
        };
        let settles = applied >= outstanding;

        let total_cost = debt.total_cost;
        let new_paid = if settles {
            total_cost
        } else {
            debt.total_paid + applied
        };

        let mut active: transaction::ActiveModel = debt.into();
        active.total_paid = Set(new_paid);
        active.is_fully_paid = Set(settles);
        let updated = active.update(&txn).await?;

        let allocation = payment_record_list::ActiveModel {
            payment_record_id: Set(payment.id),
            transaction_id: Set(updated.id),
            amount: Set(applied),
            ..Default::default()
        };
        allocation.insert(&txn).await?;

        remaining -= applied;
        allocations.push(Allocation {
            transaction: updated,
            amount: applied,
        });
    }

    txn.commit().await?;

    info!(
        customer_id,
        amount,
        settled = allocations.iter().filter(|a| a.transaction.is_fully_paid).count(),
        remaining,
        "Applied credit payment"
    );

    Ok(PaymentOutcome {
        payment: Some(payment),
        allocations,
        remaining,
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
    async fn test_apply_payment_validation() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(matches!(
            apply_payment(&db, "C-001", 0.0).await,
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            apply_payment(&db, "C-001", -10.0).await,
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            apply_payment(&db, "C-001", f64::NAN).await,
            Err(Error::InvalidAmount { .. })
        ));

        // Unknown customer with a valid amount
        assert!(matches!(
            apply_payment(&db, "C-404", 10.0).await,
            Err(Error::CustomerNotFound { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_no_outstanding_is_noop_success() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "C-001").await?;

        let outcome = apply_payment(&db, &customer.id, 75.0).await?;

        assert!(outcome.payment.is_none());
        assert!(outcome.allocations.is_empty());
        assert_eq!(outcome.remaining, 75.0);
        assert_eq!(PaymentRecord::find().all(&db).await?.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_partial_payment_settles_oldest_first() -> Result<()> {
        // The worked example: T1 (cost 100) then T2 (cost 50); paying 120
        // settles T1 and leaves T2 partially paid at 20.
        let (db, customer, t1, t2) = setup_with_two_debts(100.0, 50.0).await?;

        let outcome = apply_payment(&db, &customer.id, 120.0).await?;

        assert_eq!(outcome.remaining, 0.0);
        assert_eq!(outcome.total_applied(), 120.0);
        assert_eq!(outcome.allocations.len(), 2);

        let first = &outcome.allocations[0];
        assert_eq!(first.transaction.id, t1.id);
        assert_eq!(first.amount, 100.0);
        assert_eq!(first.transaction.total_paid, 100.0);
        assert!(first.transaction.is_fully_paid);

        let second = &outcome.allocations[1];
        assert_eq!(second.transaction.id, t2.id);
        assert_eq!(second.amount, 20.0);
        assert_eq!(second.transaction.total_paid, 20.0);
        assert!(!second.transaction.is_fully_paid);

        Ok(())
    }

    #[tokio::test]
    async fn test_overpayment_returns_change() -> Result<()> {
        // Same debts, paying 200: both settle and 50 comes back, with the
        // leftover never written to the ledger.
        let (db, customer, _t1, _t2) = setup_with_two_debts(100.0, 50.0).await?;

        let outcome = apply_payment(&db, &customer.id, 200.0).await?;

        assert_eq!(outcome.remaining, 50.0);
        assert_eq!(outcome.total_applied(), 150.0);
        assert!(outcome.allocations.iter().all(|a| a.transaction.is_fully_paid));

        let allocated: f64 = PaymentRecordList::find()
            .all(&db)
            .await?
            .iter()
            .map(|a| a.amount)
            .sum();
        assert_eq!(allocated, 150.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_exact_payment_settles_everything() -> Result<()> {
        let (db, customer, t1, t2) = setup_with_two_debts(100.0, 50.0).await?;

        let outcome = apply_payment(&db, &customer.id, 150.0).await?;

        assert_eq!(outcome.remaining, 0.0);
        for id in [t1.id, t2.id] {
            let reloaded = Transaction::find_by_id(id).one(&db).await?.unwrap();
            assert!(reloaded.is_fully_paid);
            assert_eq!(reloaded.total_paid, reloaded.total_cost);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_smaller_than_oldest_debt() -> Result<()> {
        let (db, customer, t1, t2) = setup_with_two_debts(100.0, 50.0).await?;

        let outcome = apply_payment(&db, &customer.id, 30.0).await?;

        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(outcome.allocations[0].transaction.id, t1.id);
        assert_eq!(outcome.allocations[0].transaction.total_paid, 30.0);
        assert!(!outcome.allocations[0].transaction.is_fully_paid);

        // T2 untouched
        let reloaded = Transaction::find_by_id(t2.id).one(&db).await?.unwrap();
        assert_eq!(reloaded.total_paid, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_prior_partial_payment_decrements_by_outstanding() -> Result<()> {
        // After a first payment of 30 against T1 (cost 100), a payment of 80
        // must settle T1 by deducting only the 70 outstanding, leaving 10 to
        // flow into T2.
        let (db, customer, t1, t2) = setup_with_two_debts(100.0, 50.0).await?;

        apply_payment(&db, &customer.id, 30.0).await?;
        let outcome = apply_payment(&db, &customer.id, 80.0).await?;

        assert_eq!(outcome.remaining, 0.0);
        assert_eq!(outcome.allocations.len(), 2);
        assert_eq!(outcome.allocations[0].transaction.id, t1.id);
        assert_eq!(outcome.allocations[0].amount, 70.0);
        assert!(outcome.allocations[0].transaction.is_fully_paid);
        assert_eq!(outcome.allocations[1].transaction.id, t2.id);
        assert_eq!(outcome.allocations[1].amount, 10.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_allocation_rows_reference_payment() -> Result<()> {
        let (db, customer, _t1, _t2) = setup_with_two_debts(100.0, 50.0).await?;

        let outcome = apply_payment(&db, &customer.id, 120.0).await?;
        let payment = outcome.payment.unwrap();
        assert_eq!(payment.amount, 120.0);

        let allocations = PaymentRecordList::find()
            .filter(
                crate::entities::PaymentRecordListColumn::PaymentRecordId.eq(payment.id),
            )
            .all(&db)
            .await?;
        assert_eq!(allocations.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_cash_sales_are_not_settled() -> Result<()> {
        // A customer's attributed cash sales are already fully paid and must
        // never appear in an allocation pass.
        let mut fixture = setup_register().await?;
        let product = fixture.products.remove(0);
        let customer = create_test_customer(&fixture.db, "C-001").await?;

        crate::core::checkout::create_sale(
            &fixture.db,
            fixture.cashier.id,
            Some(customer.id.clone()),
            crate::entities::transaction::TYPE_CASH,
            10.0,
            &[crate::core::checkout::OrderLineInput {
                product_id: product.id,
                quantity: 1,
            }],
        )
        .await?;

        let outcome = apply_payment(&fixture.db, &customer.id, 40.0).await?;
        assert!(outcome.payment.is_none());
        assert_eq!(outcome.remaining, 40.0);

        Ok(())
    }
}
