//! Pricing - Resolves the current unit price of a menu item.
//!
//! The authoritative price of an item is the row with the latest `updated_at`
//! among all rows sharing its name. Resolution is read-only and holds no lock,
//! so a price row added while an order is in flight only affects later orders.

use crate::{
    core::catalog::CatalogStore,
    errors::{Error, Result},
};
use rust_decimal::Decimal;

/// The price row an order line is priced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub item_id: i64,
    pub unit_price: Decimal,
}

/// Returns the item id and unit price of the latest price row for `item_name`.
///
/// # Errors
/// - [`Error::Validation`] if the name is empty after trimming
/// - [`Error::ItemNotFound`] if no row has that name
pub async fn resolve<S>(catalog: &S, item_name: &str) -> Result<ResolvedPrice>
where
    S: CatalogStore + ?Sized,
{
    let name = item_name.trim();
    if name.is_empty() {
        return Err(Error::validation("Item name cannot be empty"));
    }

    let item = catalog
        .find_latest_item_by_name(name)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            name: name.to_string(),
        })?;

    Ok(ResolvedPrice {
        item_id: item.item_id,
        unit_price: item.unit_price,
    })
}
