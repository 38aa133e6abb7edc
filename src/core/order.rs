//! Order assembly - Turns an order request into a fully priced transaction.
//!
//! Assembly validates the request, resolves the customer, the payment method
//! and the current price of every line, and computes subtotals and the order
//! total. It only reads from the catalog. A customer seen for the first time is
//! returned as [`CustomerResolution::Provisional`] and is written later by
//! [`crate::core::writer::commit`], inside the same unit of work as the
//! transaction itself.

use std::collections::HashSet;

use crate::{
    core::{
        catalog::{CatalogStore, NewCustomer, normalize_email},
        pricing,
    },
    entities::{Location, transaction::STATUS_COMPLETED},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Length of a transaction id in hex characters
pub const TRANSACTION_ID_LEN: usize = 16;

/// An inbound order as submitted by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Matched case-insensitively against existing customers
    pub customer_email: String,
    /// At least one line, each item name at most once
    pub items: Vec<OrderLine>,
    /// Exact name of an active payment method
    pub payment_method: String,
    /// `"In-store"` or `"Takeaway"`
    pub location: String,
    /// `YYYY-MM-DD` or RFC 3339; defaults to the time of submission
    #[serde(default)]
    pub transaction_date: Option<String>,
}

/// One requested item and quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item name, trimmed before lookup
    pub item_name: String,
    /// Must be greater than zero
    pub quantity: i32,
}

/// Outcome of looking up the ordering customer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomerResolution {
    /// The email already belongs to this customer id
    Existing(i64),
    /// First order from this email; written together with the transaction
    Provisional(NewCustomer),
}

/// A line priced from a specific item row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricedLine {
    /// The price row this line was priced from
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i32,
    /// Price captured at assembly time
    pub unit_price: Decimal,
    /// `quantity * unit_price`
    pub subtotal: Decimal,
}

/// A transaction ready to be committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricedTransaction {
    /// Freshly generated, see [`generate_transaction_id`]
    pub transaction_id: String,
    pub customer: CustomerResolution,
    pub payment_method_id: i64,
    pub location: Location,
    /// Sum of `lines[..].subtotal`
    pub total_spent: Decimal,
    /// Always `completed` for new orders
    pub status: String,
    /// The requested transaction date, or the time of assembly
    pub created_at: DateTime<Utc>,
    /// One per requested line, in request order
    pub lines: Vec<PricedLine>,
}

/// Produces a new opaque transaction id.
///
/// A random 128-bit token is hashed with SHA-256 and the first
/// [`TRANSACTION_ID_LEN`] hex characters are kept. The id says nothing about
/// the order's content and must not be used to detect duplicate submissions.
#[must_use]
pub fn generate_transaction_id() -> String {
    let token = Uuid::new_v4();
    let digest = Sha256::digest(token.simple().to_string().as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(TRANSACTION_ID_LEN);
    id
}

/// Validates and prices an order without writing anything.
///
/// # Errors
/// - [`Error::Validation`] for an empty or malformed email, an unknown
///   location, an empty item list, an empty item name, a non-positive
///   quantity, a repeated item name, an unparseable `transaction_date`, an
///   inactive payment method, or a total that does not fit in a decimal
/// - [`Error::PaymentMethodNotFound`] if the payment method does not exist
/// - [`Error::ItemNotFound`] if any requested item does not exist
/// - [`Error::Persistence`] if a catalog lookup fails
#[instrument(skip(catalog, request), fields(lines = request.items.len()))]
pub async fn assemble<S>(catalog: &S, request: &OrderRequest) -> Result<PricedTransaction>
where
    S: CatalogStore + ?Sized,
{
    // Validation happens before any catalog access
    let email = normalize_email(&request.customer_email);
    let customer_name = default_customer_name(&email)?;
    let location = Location::parse(&request.location).ok_or_else(|| {
        Error::validation(format!(
            "Location must be \"In-store\" or \"Takeaway\", got {:?}",
            request.location
        ))
    })?;
    validate_lines(&request.items)?;
    let created_at = match request.transaction_date.as_deref() {
        Some(raw) => parse_transaction_date(raw)?,
        None => Utc::now(),
    };

    let customer = match catalog.find_customer_by_email(&email).await? {
        Some(existing) => CustomerResolution::Existing(existing.customer_id),
        None => {
            debug!("No customer for {email}, reserving a provisional one");
            CustomerResolution::Provisional(NewCustomer {
                name: customer_name,
                email,
            })
        }
    };

    let payment_method = catalog
        .find_payment_method_by_name(&request.payment_method)
        .await?
        .ok_or_else(|| Error::PaymentMethodNotFound {
            name: request.payment_method.clone(),
        })?;
    if !payment_method.is_active {
        return Err(Error::validation(format!(
            "Payment method is inactive: {}",
            payment_method.name
        )));
    }

    let transaction_id = generate_transaction_id();

    let mut lines = Vec::with_capacity(request.items.len());
    let mut total_spent = Decimal::ZERO;
    for requested in &request.items {
        let price = pricing::resolve(catalog, &requested.item_name).await?;
        let subtotal = Decimal::from(requested.quantity)
            .checked_mul(price.unit_price)
            .ok_or_else(|| Error::validation("Line subtotal is out of range"))?;
        total_spent = total_spent
            .checked_add(subtotal)
            .ok_or_else(|| Error::validation("Order total is out of range"))?;

        lines.push(PricedLine {
            item_id: price.item_id,
            item_name: requested.item_name.trim().to_string(),
            quantity: requested.quantity,
            unit_price: price.unit_price,
            subtotal,
        });
    }

    debug!(%transaction_id, %total_spent, "Assembled order");

    Ok(PricedTransaction {
        transaction_id,
        customer,
        payment_method_id: payment_method.payment_method_id,
        location,
        total_spent,
        status: STATUS_COMPLETED.to_string(),
        created_at,
        lines,
    })
}

/// Returns the local part of a normalized email, used as the display name of
/// new customers.
fn default_customer_name(email: &str) -> Result<String> {
    if email.is_empty() {
        return Err(Error::validation("Customer email cannot be empty"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(local.to_string()),
        _ => Err(Error::validation(format!(
            "Customer email is not a valid address: {email}"
        ))),
    }
}

fn validate_lines(lines: &[OrderLine]) -> Result<()> {
    if lines.is_empty() {
        return Err(Error::validation("An order needs at least one item"));
    }

    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        let name = line.item_name.trim();
        if name.is_empty() {
            return Err(Error::validation("Item name cannot be empty"));
        }
        if line.quantity <= 0 {
            return Err(Error::validation(format!(
                "Quantity for {name} must be greater than zero, got {}",
                line.quantity
            )));
        }
        if !seen.insert(name) {
            return Err(Error::validation(format!(
                "Item {name} appears more than once in the order"
            )));
        }
    }
    Ok(())
}

fn parse_transaction_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            Error::validation(format!(
                "Transaction date must be YYYY-MM-DD or RFC 3339, got {raw:?}"
            ))
        })
}
