//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customer;
pub mod item;
pub mod legacy_transaction;
pub mod payment_method;
pub mod transaction;
pub mod transaction_error;
pub mod transaction_item;

// Re-export specific types to avoid conflicts
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use legacy_transaction::{
    Column as LegacyTransactionColumn, Entity as LegacyTransaction,
    Model as LegacyTransactionModel,
};
pub use payment_method::{
    Column as PaymentMethodColumn, Entity as PaymentMethod, Model as PaymentMethodModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Location, Model as TransactionModel,
};
pub use transaction_error::{
    Column as TransactionErrorColumn, Entity as TransactionError, Model as TransactionErrorModel,
};
pub use transaction_item::{
    Column as TransactionItemColumn, Entity as TransactionItem, Model as TransactionItemModel,
};
