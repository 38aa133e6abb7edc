//! Shared test utilities.
//!
//! This module provides helpers for setting up in-memory test databases,
//! creating catalog entries with sensible defaults, and an in-memory
//! [`CatalogStore`] fake for tests that must not touch a database.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    core::{
        catalog::{self, CatalogStore, NewCustomer, NewItem, NewPaymentMethod},
        order::{OrderLine, OrderRequest},
        submission,
        transaction::TransactionWithItems,
    },
    entities::{customer, item, payment_method},
    errors::Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a customer whose name is the local part of `email`.
pub async fn create_test_customer(db: &DatabaseConnection, email: &str) -> Result<customer::Model> {
    let name = email.split('@').next().unwrap_or(email).to_string();
    catalog::create_customer(
        db,
        NewCustomer {
            name,
            email: email.to_string(),
        },
    )
    .await
}

/// Creates an item price row effective now.
pub async fn create_test_item(
    db: &DatabaseConnection,
    name: &str,
    unit_price: Decimal,
) -> Result<item::Model> {
    catalog::create_item(
        db,
        NewItem {
            name: name.to_string(),
            unit_price,
            updated_at: None,
        },
    )
    .await
}

/// Creates an item price row effective at `updated_at`.
pub async fn create_dated_item(
    db: &DatabaseConnection,
    name: &str,
    unit_price: Decimal,
    updated_at: DateTime<Utc>,
) -> Result<item::Model> {
    catalog::create_item(
        db,
        NewItem {
            name: name.to_string(),
            unit_price,
            updated_at: Some(updated_at),
        },
    )
    .await
}

/// Creates an active payment method.
pub async fn create_test_payment_method(
    db: &DatabaseConnection,
    name: &str,
) -> Result<payment_method::Model> {
    catalog::create_payment_method(
        db,
        NewPaymentMethod {
            name: name.to_string(),
            is_active: true,
        },
    )
    .await
}

/// The catalog rows created by [`setup_with_catalog`].
pub struct CatalogFixture {
    /// "Latte" at 4.50
    pub latte: item::Model,
    /// "Cookie" at 1.25
    pub cookie: item::Model,
    /// Active "Cash" payment method
    pub cash: payment_method::Model,
}

/// Sets up a test database with a small menu and one payment method.
pub async fn setup_with_catalog() -> Result<(DatabaseConnection, CatalogFixture)> {
    let db = setup_test_db().await?;
    let fixture = seed_test_catalog(&db).await?;
    Ok((db, fixture))
}

/// Creates a file-backed database under `dir`, tables and menu included.
///
/// Unlike `sqlite::memory:`, the pool behind it holds several connections, so
/// concurrent submissions really overlap.
pub async fn setup_file_db_with_catalog(
    dir: &Path,
) -> Result<(DatabaseConnection, CatalogFixture)> {
    let url = format!("sqlite://{}?mode=rwc", dir.join("cafe_pos.sqlite").display());
    let db = crate::config::database::create_connection(&url).await?;
    crate::config::database::create_tables(&db).await?;
    let fixture = seed_test_catalog(&db).await?;
    Ok((db, fixture))
}

async fn seed_test_catalog(db: &DatabaseConnection) -> Result<CatalogFixture> {
    let latte = create_test_item(db, "Latte", Decimal::new(450, 2)).await?;
    let cookie = create_test_item(db, "Cookie", Decimal::new(125, 2)).await?;
    let cash = create_test_payment_method(db, "Cash").await?;
    Ok(CatalogFixture { latte, cookie, cash })
}

/// Builds an order request without a transaction date.
pub fn order_request(
    email: &str,
    lines: &[(&str, i32)],
    payment_method: &str,
    location: &str,
) -> OrderRequest {
    OrderRequest {
        customer_email: email.to_string(),
        items: lines
            .iter()
            .map(|(item_name, quantity)| OrderLine {
                item_name: (*item_name).to_string(),
                quantity: *quantity,
            })
            .collect(),
        payment_method: payment_method.to_string(),
        location: location.to_string(),
        transaction_date: None,
    }
}

/// Submits an in-store cash order, for tests that need committed data.
pub async fn submit_test_order(
    db: &DatabaseConnection,
    email: &str,
    lines: &[(&str, i32)],
) -> Result<TransactionWithItems> {
    submission::submit_order(db, order_request(email, lines, "Cash", "In-store")).await
}

/// In-memory catalog that counts lookups and writes.
#[derive(Default)]
pub struct FakeCatalog {
    customers: Mutex<Vec<customer::Model>>,
    payment_methods: Vec<payment_method::Model>,
    items: Vec<item::Model>,
    lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_customer(self, customer_id: i64, email: &str) -> Self {
        if let Ok(mut customers) = self.customers.lock() {
            customers.push(customer::Model {
                customer_id,
                name: email.to_string(),
                email: email.to_string(),
                created_at: Utc::now(),
            });
        }
        self
    }

    pub fn with_payment_method(mut self, id: i64, name: &str, is_active: bool) -> Self {
        self.payment_methods.push(payment_method::Model {
            payment_method_id: id,
            name: name.to_string(),
            is_active,
            created_at: Utc::now(),
        });
        self
    }

    /// Adds a price row effective now; later calls win over earlier ones.
    pub fn with_item(mut self, id: i64, name: &str, unit_price: Decimal) -> Self {
        let now = Utc::now();
        self.items.push(item::Model {
            item_id: id,
            name: name.to_string(),
            unit_price,
            created_at: now,
            updated_at: now,
        });
        self
    }

    /// Number of catalog reads performed so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of catalog writes performed so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogStore for FakeCatalog {
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<customer::Model>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .customers
            .lock()
            .ok()
            .and_then(|customers| customers.iter().find(|c| c.email == email).cloned()))
    }

    async fn create_customer(&self, new_customer: NewCustomer) -> Result<customer::Model> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut customers = self
            .customers
            .lock()
            .map_err(|e| crate::errors::Error::validation(e.to_string()))?;
        let customer = customer::Model {
            customer_id: i64::try_from(customers.len()).unwrap_or(i64::MAX) + 1,
            name: new_customer.name,
            email: new_customer.email,
            created_at: Utc::now(),
        };
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn find_payment_method_by_name(
        &self,
        name: &str,
    ) -> Result<Option<payment_method::Model>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.payment_methods.iter().find(|m| m.name == name).cloned())
    }

    async fn find_latest_item_by_name(&self, name: &str) -> Result<Option<item::Model>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .iter()
            .filter(|i| i.name == name)
            .max_by_key(|i| (i.updated_at, i.item_id))
            .cloned())
    }
}
