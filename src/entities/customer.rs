//! Customer entity - People who have placed at least one order.
//!
//! Customers are keyed by email. Emails are normalized to lowercase before they
//! are stored, so the unique index on `email` behaves case-insensitively.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Server-assigned identifier
    #[sea_orm(primary_key)]
    pub customer_id: i64,
    /// Display name, defaults to the local part of the email
    pub name: String,
    /// Lowercased email address
    #[sea_orm(unique)]
    pub email: String,
    /// When the customer row was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
