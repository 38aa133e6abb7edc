//! Item entity - Menu items and their price history.
//!
//! Several rows may share a name. Each row is an immutable price point; a price
//! change inserts a new row, and the row with the latest `updated_at` is the
//! current price for that name.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for this price row
    #[sea_orm(primary_key)]
    pub item_id: i64,
    /// Name of the item (e.g., "Latte", "Cookie")
    pub name: String,
    /// Price per unit, never negative
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub unit_price: Decimal,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
    /// Effective time of this price; the latest one wins
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item row is referenced by many order lines
    #[sea_orm(has_many = "super::transaction_item::Entity")]
    TransactionItems,
}

impl Related<super::transaction_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
