//! Transaction error entity - Append-only log of rejected submissions.
//!
//! All submitted fields are kept as text because the rejected input may not
//! parse as numbers or dates. Rows are diagnostic only and nothing references
//! them.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction error database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions_errors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub transaction_id: Option<String>,
    pub customer_email: Option<String>,
    /// Requested line items, serialized as JSON text
    pub items: Option<String>,
    pub item: Option<String>,
    pub quantity: Option<String>,
    pub price_per_unit: Option<String>,
    pub total_spent: Option<String>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub transaction_date: Option<String>,
    /// Human-readable reason the submission was rejected
    pub error_message: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
