//! Catalog business logic - Customers, payment methods and menu items.
//!
//! The order workflow only needs four lookups from the catalog, captured by the
//! [`CatalogStore`] trait. The trait is implemented for live connections and for
//! open database transactions, so the same lookups run inside the commit unit,
//! and tests can substitute an in-memory fake.
//!
//! The plain create/list functions below back the REST endpoints and the
//! startup seed. They hold no pricing logic.

use crate::{
    config::catalog::CatalogSeed,
    entities::{Customer, Item, PaymentMethod, customer, item, payment_method},
    errors::{Error, Result},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// A customer that has not been written yet.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

/// A new price row for a menu item.
#[derive(Clone, Debug, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub unit_price: Decimal,
    /// Effective time of the price, defaults to now
    #[serde(default)]
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPaymentMethod {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// Catalog lookups consumed by the order workflow.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Finds a customer by an already-normalized (trimmed, lowercased) email.
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<customer::Model>>;

    async fn create_customer(&self, new_customer: NewCustomer) -> Result<customer::Model>;

    /// Finds a payment method by exact name.
    async fn find_payment_method_by_name(
        &self,
        name: &str,
    ) -> Result<Option<payment_method::Model>>;

    /// Finds the most recent price row for an item name.
    async fn find_latest_item_by_name(&self, name: &str) -> Result<Option<item::Model>>;
}

macro_rules! impl_catalog_store {
    ($conn:ty) => {
        #[async_trait]
        impl CatalogStore for $conn {
            async fn find_customer_by_email(
                &self,
                email: &str,
            ) -> Result<Option<customer::Model>> {
                find_customer_by_email(self, email).await
            }

            async fn create_customer(&self, new_customer: NewCustomer) -> Result<customer::Model> {
                create_customer(self, new_customer).await
            }

            async fn find_payment_method_by_name(
                &self,
                name: &str,
            ) -> Result<Option<payment_method::Model>> {
                find_payment_method_by_name(self, name).await
            }

            async fn find_latest_item_by_name(&self, name: &str) -> Result<Option<item::Model>> {
                find_latest_item_by_name(self, name).await
            }
        }
    };
}

impl_catalog_store!(DatabaseConnection);
impl_catalog_store!(DatabaseTransaction);

/// Trims and lowercases an email address.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn find_customer_by_email<C>(db: &C, email: &str) -> Result<Option<customer::Model>>
where
    C: ConnectionTrait,
{
    Customer::find()
        .filter(customer::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a customer, normalizing the email first.
///
/// # Errors
/// Returns a validation error for an empty name or email, and a persistence
/// error if the email is already taken.
pub async fn create_customer<C>(db: &C, new_customer: NewCustomer) -> Result<customer::Model>
where
    C: ConnectionTrait,
{
    let email = normalize_email(&new_customer.email);
    if email.is_empty() {
        return Err(Error::validation("Customer email cannot be empty"));
    }
    if new_customer.name.trim().is_empty() {
        return Err(Error::validation("Customer name cannot be empty"));
    }

    let customer = customer::ActiveModel {
        name: Set(new_customer.name.trim().to_string()),
        email: Set(email),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    customer.insert(db).await.map_err(Into::into)
}

pub async fn find_payment_method_by_name<C>(
    db: &C,
    name: &str,
) -> Result<Option<payment_method::Model>>
where
    C: ConnectionTrait,
{
    PaymentMethod::find()
        .filter(payment_method::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the price row with the latest `updated_at` for `name`.
///
/// Rows sharing the same `updated_at` are ordered by `item_id`, so the most
/// recently inserted one wins.
pub async fn find_latest_item_by_name<C>(db: &C, name: &str) -> Result<Option<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find()
        .filter(item::Column::Name.eq(name))
        .order_by_desc(item::Column::UpdatedAt)
        .order_by_desc(item::Column::ItemId)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new price row for an item.
///
/// Existing rows are never updated, so line items that captured an older
/// price keep pointing at the row they were priced from.
///
/// # Errors
/// Returns a validation error if the name is empty or the price is negative.
pub async fn create_item<C>(db: &C, new_item: NewItem) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    if new_item.name.trim().is_empty() {
        return Err(Error::validation("Item name cannot be empty"));
    }
    if new_item.unit_price < Decimal::ZERO {
        return Err(Error::validation(format!(
            "Unit price cannot be negative: {}",
            new_item.unit_price
        )));
    }

    let now = chrono::Utc::now();
    let item = item::ActiveModel {
        name: Set(new_item.name.trim().to_string()),
        unit_price: Set(new_item.unit_price),
        created_at: Set(now),
        updated_at: Set(new_item.updated_at.unwrap_or(now)),
        ..Default::default()
    };
    item.insert(db).await.map_err(Into::into)
}

/// Inserts a payment method.
///
/// # Errors
/// Returns a validation error for an empty name, and a persistence error if
/// the name already exists.
pub async fn create_payment_method<C>(
    db: &C,
    new_method: NewPaymentMethod,
) -> Result<payment_method::Model>
where
    C: ConnectionTrait,
{
    if new_method.name.trim().is_empty() {
        return Err(Error::validation("Payment method name cannot be empty"));
    }

    let method = payment_method::ActiveModel {
        name: Set(new_method.name.trim().to_string()),
        is_active: Set(new_method.is_active),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    method.insert(db).await.map_err(Into::into)
}

/// Retrieves every item price row, ordered by name then newest first.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<item::Model>> {
    Item::find()
        .order_by_asc(item::Column::Name)
        .order_by_desc(item::Column::UpdatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

pub async fn list_payment_methods(db: &DatabaseConnection) -> Result<Vec<payment_method::Model>> {
    PaymentMethod::find()
        .order_by_asc(payment_method::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts the seeded items and payment methods that are not present yet.
///
/// Items are matched by name only: an existing item keeps its current price
/// even if the seed lists a different one.
pub async fn seed_catalog(db: &DatabaseConnection, seed: &CatalogSeed) -> Result<()> {
    for method in &seed.payment_methods {
        if find_payment_method_by_name(db, &method.name).await?.is_none() {
            create_payment_method(
                db,
                NewPaymentMethod {
                    name: method.name.clone(),
                    is_active: method.is_active,
                },
            )
            .await?;
            info!("Seeded payment method '{}'", method.name);
        }
    }

    for seeded in &seed.items {
        if find_latest_item_by_name(db, &seeded.name).await?.is_none() {
            create_item(
                db,
                NewItem {
                    name: seeded.name.clone(),
                    unit_price: seeded.unit_price,
                    updated_at: None,
                },
            )
            .await?;
            info!("Seeded item '{}' at {}", seeded.name, seeded.unit_price);
        }
    }

    Ok(())
}
