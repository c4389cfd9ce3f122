//! Customer account, credit payment, and history operations.

use crate::{
    core::{customer as customer_core, ledger},
    entities::{customer, payment_record, payment_record_list, transaction},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use super::DateRangeDto;

/// Request to create or update a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRequest {
    /// Caller-assigned customer id
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact number
    pub contact_number: String,
}

/// Request for one page of customers.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GetCustomersRequest {
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub items_per_page: u64,
}

/// A customer with their outstanding credit.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummaryDto {
    /// The customer row
    pub customer: customer::Model,
    /// Total unpaid credit balance
    pub outstanding: f64,
}

/// One page of customers.
#[derive(Debug, Clone, Serialize)]
pub struct GetCustomersResponse {
    /// Customers on this page
    pub items: Vec<CustomerSummaryDto>,
    /// Total customer count
    pub total_count: u64,
}

/// Request addressing one customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerIdRequest {
    /// Customer id
    pub id: String,
}

/// Request to apply a credit payment.
#[derive(Debug, Clone, Deserialize)]
pub struct PayCreditsRequest {
    /// Paying customer
    pub customer_id: String,
    /// Amount handed over
    pub amount: f64,
}

/// Result of applying a credit payment.
#[derive(Debug, Clone, Serialize)]
pub struct PayCreditsResponse {
    /// Unallocated remainder handed back to the customer
    pub remaining_payment: f64,
    /// Transactions touched by the allocation, oldest first
    pub updated_transactions: Vec<transaction::Model>,
}

/// Request for a customer's unpaid credit or payment history.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerLedgerRequest {
    /// Customer id
    pub id: String,
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub items_per_page: u64,
    /// Optional date filter
    pub date_range: Option<DateRangeDto>,
}

/// One page of a customer's unpaid credit sales.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerCreditResponse {
    /// Unpaid CREDIT transactions, oldest first
    pub transactions: Vec<transaction::Model>,
    /// Total outstanding over the whole range
    pub total_cost: f64,
    /// Number of unpaid transactions in the range
    pub total_count: u64,
}

/// A payment with its allocation lines.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentDto {
    /// The payment event
    pub payment: payment_record::Model,
    /// How it was split across transactions
    pub allocations: Vec<payment_record_list::Model>,
}

/// One page of a customer's payment history.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerHistoryResponse {
    /// Payments on this page, newest first
    pub payments: Vec<PaymentDto>,
    /// Number of payments in the range
    pub total_count: u64,
}

/// Creates a customer.
pub async fn create(db: &DatabaseConnection, req: CustomerRequest) -> Result<customer::Model> {
    customer_core::create_customer(db, req.id, req.first_name, req.last_name, req.contact_number)
        .await
}

/// Updates a customer's name and contact number.
pub async fn update(db: &DatabaseConnection, req: CustomerRequest) -> Result<customer::Model> {
    customer_core::update_customer(
        db,
        &req.id,
        req.first_name,
        req.last_name,
        req.contact_number,
    )
    .await
}

/// Returns one page of customers with their outstanding balances.
pub async fn get_customers(
    db: &DatabaseConnection,
    req: GetCustomersRequest,
) -> Result<GetCustomersResponse> {
    let page = customer_core::list_customers(db, req.page, req.items_per_page).await?;
    Ok(GetCustomersResponse {
        items: page
            .items
            .into_iter()
            .map(|summary| CustomerSummaryDto {
                customer: summary.customer,
                outstanding: summary.outstanding,
            })
            .collect(),
        total_count: page.total_count,
    })
}

/// Fetches one customer.
pub async fn get_customer_by_id(
    db: &DatabaseConnection,
    req: CustomerIdRequest,
) -> Result<Option<customer::Model>> {
    customer_core::get_customer_by_id(db, &req.id).await
}

/// Deletes a customer.
pub async fn delete(db: &DatabaseConnection, req: CustomerIdRequest) -> Result<()> {
    customer_core::delete_customer(db, &req.id).await
}

/// Applies a payment against the customer's unpaid credit, oldest first.
pub async fn pay_credits(
    db: &DatabaseConnection,
    req: PayCreditsRequest,
) -> Result<PayCreditsResponse> {
    let outcome = ledger::apply_payment(db, &req.customer_id, req.amount).await?;
    Ok(PayCreditsResponse {
        remaining_payment: outcome.remaining,
        updated_transactions: outcome
            .allocations
            .into_iter()
            .map(|allocation| allocation.transaction)
            .collect(),
    })
}

/// Returns one page of the customer's unpaid credit with the total outstanding.
pub async fn get_customer_credit(
    db: &DatabaseConnection,
    req: CustomerLedgerRequest,
) -> Result<CustomerCreditResponse> {
    let range = req.date_range.unwrap_or_default().into();
    let view =
        customer_core::customer_credit(db, &req.id, req.page, req.items_per_page, range).await?;
    Ok(CustomerCreditResponse {
        transactions: view.transactions,
        total_cost: view.total_outstanding,
        total_count: view.total_count,
    })
}

/// Returns one page of the customer's payment history.
pub async fn get_customer_history(
    db: &DatabaseConnection,
    req: CustomerLedgerRequest,
) -> Result<CustomerHistoryResponse> {
    let range = req.date_range.unwrap_or_default().into();
    let view =
        customer_core::customer_history(db, &req.id, req.page, req.items_per_page, range).await?;
    Ok(CustomerHistoryResponse {
        payments: view
            .payments
            .into_iter()
            .map(|entry| PaymentDto {
                payment: entry.payment,
                allocations: entry.allocations,
            })
            .collect(),
        total_count: view.total_count,
    })
}
