//! Report generation business logic.
//!
//! Sales reports, per-product sales grouping, and the back-office dashboard
//! aggregates. All functions are framework-agnostic and return structured
//! data for the RPC layer to serialize. Aggregation state is always local to
//! the call; nothing here persists between requests.

use crate::{
    core::DateRange,
    entities::{
        Category, Customer, Order, Product, ProductPriceHistory, Transaction, order, product,
        transaction,
    },
    errors::{Error, Result},
};
use chrono::Datelike;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Select, prelude::*};
use std::collections::HashMap;

/// One page of the sales report, with range-wide totals.
#[derive(Debug, Clone)]
pub struct SalesReport {
    /// Transactions on this page, newest first
    pub transactions: Vec<transaction::Model>,
    /// Sum of `total_cost` over every transaction in the range
    pub total_cost: f64,
    /// Sum of `total_cost` over the CASH transactions in the range
    pub cash_total: f64,
    /// Sum of `total_cost` over the CREDIT transactions in the range
    pub credit_total: f64,
    /// Number of transactions in the range
    pub total_count: u64,
}

/// Sales of one product over a report range.
#[derive(Debug, Clone)]
pub struct ProductSales {
    /// Product id
    pub product_id: i32,
    /// Product name
    pub name: String,
    /// Category name ("Uncategorized" if the category row is gone)
    pub category: String,
    /// Snapshot unit price of the most recent line included
    pub price: f64,
    /// Units sold
    pub quantity: i64,
    /// Revenue for this product (sum of snapshot price times quantity)
    pub total_sales: f64,
}

/// Per-product sales grouping with the grand total.
#[derive(Debug, Clone)]
pub struct ProductSalesReport {
    /// One row per product sold in the range, ordered by name
    pub products: Vec<ProductSales>,
    /// Sum of `total_sales` over all rows
    pub grand_total: f64,
}

/// Aggregates for the back-office dashboard.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// The eight most recent unpaid credit sales
    pub recent_credit: Vec<transaction::Model>,
    /// Number of customer accounts
    pub customer_count: u64,
    /// Number of AVAILABLE products
    pub product_count: u64,
    /// Sum of `total_cost` over every fully paid transaction
    pub overall_sales: f64,
    /// Sum of `total_cost` over fully paid transactions this calendar month
    pub monthly_sales: f64,
}

fn transactions_in_range(range: DateRange) -> Select<Transaction> {
    let mut query = Transaction::find()
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id);

    if let Some(from) = range.from {
        query = query.filter(transaction::Column::CreatedAt.gte(from));
    }
    if let Some(to) = range.to {
        query = query.filter(transaction::Column::CreatedAt.lte(to));
    }
    query
}

/// Generates one page of the sales report for a date range, with cash/credit
/// totals computed over the whole range rather than the page.
pub async fn sales_report(
    db: &DatabaseConnection,
    range: DateRange,
    page: u64,
    items_per_page: u64,
) -> Result<SalesReport> {
    let all = transactions_in_range(range).all(db).await?;

    let total_cost = all.iter().map(|t| t.total_cost).sum();
    let cash_total = all
        .iter()
        .filter(|t| t.transaction_type == transaction::TYPE_CASH)
        .map(|t| t.total_cost)
        .sum();
    let credit_total = all
        .iter()
        .filter(|t| t.transaction_type == transaction::TYPE_CREDIT)
        .map(|t| t.total_cost)
        .sum();
    let total_count = all.len() as u64;

    let per_page = items_per_page.max(1) as usize;
    let offset = (page.saturating_sub(1) as usize) * per_page;
    let transactions = all.into_iter().skip(offset).take(per_page).collect();

    Ok(SalesReport {
        transactions,
        total_cost,
        cash_total,
        credit_total,
        total_count,
    })
}

/// Groups order lines in a date range by product, optionally restricted to a
/// single product, and totals revenue per group.
///
/// The grouping map is rebuilt locally on every call.
pub async fn product_sales_report(
    db: &DatabaseConnection,
    range: DateRange,
    product_id: Option<i32>,
) -> Result<ProductSalesReport> {
    let transactions = transactions_in_range(range).all(db).await?;
    let transaction_ids: Vec<i64> = transactions.iter().map(|t| t.id).collect();
    if transaction_ids.is_empty() {
        return Ok(ProductSalesReport {
            products: Vec::new(),
            grand_total: 0.0,
        });
    }

    // Ascending id so the fold sees lines oldest-to-newest and the kept
    // snapshot price is the most recent line's
    let mut order_query = Order::find()
        .filter(order::Column::TransactionId.is_in(transaction_ids))
        .order_by_asc(order::Column::Id);
    if let Some(id) = product_id {
        order_query = order_query.filter(order::Column::ProductId.eq(id));
    }
    let orders = order_query.all(db).await?;

    let product_ids: Vec<i32> = orders.iter().map(|o| o.product_id).collect();
    let products = Product::find()
        .filter(product::Column::Id.is_in(product_ids))
        .find_also_related(Category)
        .all(db)
        .await?;
    let product_info: HashMap<i32, (String, String)> = products
        .into_iter()
        .map(|(p, c)| {
            let category = c.map_or_else(|| "Uncategorized".to_string(), |c| c.name);
            (p.id, (p.name, category))
        })
        .collect();

    let price_ids: Vec<i32> = orders.iter().map(|o| o.product_price_id).collect();
    let prices: HashMap<i32, f64> = ProductPriceHistory::find()
        .filter(crate::entities::ProductPriceHistoryColumn::Id.is_in(price_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|row| (row.id, row.amount))
        .collect();

    // Aggregation is local to this call
    let mut grouped: HashMap<i32, ProductSales> = HashMap::new();
    for order in &orders {
        let Some((name, category)) = product_info.get(&order.product_id) else {
            continue;
        };
        let price = prices.get(&order.product_price_id).copied().unwrap_or(0.0);
        let quantity = i64::from(order.quantity);
        let line_total = price * f64::from(order.quantity);

        grouped
            .entry(order.product_id)
            .and_modify(|row| {
                row.quantity += quantity;
                row.total_sales += line_total;
                row.price = price;
            })
            .or_insert_with(|| ProductSales {
                product_id: order.product_id,
                name: name.clone(),
                category: category.clone(),
                price,
                quantity,
                total_sales: line_total,
            });
    }

    let mut products: Vec<ProductSales> = grouped.into_values().collect();
    products.sort_by(|a, b| a.name.cmp(&b.name));
    let grand_total = products.iter().map(|p| p.total_sales).sum();

    Ok(ProductSalesReport {
        products,
        grand_total,
    })
}

/// Gathers the dashboard aggregates: recent unpaid credit, entity counts, and
/// overall/monthly sales over fully paid transactions.
pub async fn dashboard(db: &DatabaseConnection) -> Result<DashboardData> {
    let recent_credit = Transaction::find()
        .filter(transaction::Column::TransactionType.eq(transaction::TYPE_CREDIT))
        .filter(transaction::Column::IsFullyPaid.eq(false))
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id)
        .limit(8)
        .all(db)
        .await?;

    let customer_count = Customer::find().count(db).await?;
    let product_count = Product::find()
        .filter(product::Column::Status.eq(product::STATUS_AVAILABLE))
        .count(db)
        .await?;

    let paid = Transaction::find()
        .filter(transaction::Column::IsFullyPaid.eq(true))
        .all(db)
        .await?;
    let overall_sales = paid.iter().map(|t| t.total_cost).sum();

    let now = chrono::Utc::now();
    let month_start = now
        .date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
        .ok_or_else(|| Error::Config {
            message: "Failed to compute start of month".to_string(),
        })?;
    let monthly_sales = paid
        .iter()
        .filter(|t| t.created_at >= month_start)
        .map(|t| t.total_cost)
        .sum();

    Ok(DashboardData {
        recent_credit,
        customer_count,
        product_count,
        overall_sales,
        monthly_sales,
    })
}
