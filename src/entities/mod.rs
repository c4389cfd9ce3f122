//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod admin;
pub mod cashier;
pub mod category;
pub mod customer;
pub mod order;
pub mod payment_record;
pub mod payment_record_list;
pub mod product;
pub mod product_price_history;
pub mod stock_history;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use admin::{Column as AdminColumn, Entity as Admin, Model as AdminModel};
pub use cashier::{Column as CashierColumn, Entity as Cashier, Model as CashierModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use payment_record::{
    Column as PaymentRecordColumn, Entity as PaymentRecord, Model as PaymentRecordModel,
};
pub use payment_record_list::{
    Column as PaymentRecordListColumn, Entity as PaymentRecordList, Model as PaymentRecordListModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_price_history::{
    Column as ProductPriceHistoryColumn, Entity as ProductPriceHistory,
    Model as ProductPriceHistoryModel,
};
pub use stock_history::{
    Column as StockHistoryColumn, Entity as StockHistory, Model as StockHistoryModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
