//! Transaction entity - The header row of a committed order.
//!
//! Each transaction has a 16-hex-character `transaction_id`, the customer and
//! payment method it was placed with, a `location`, the derived `total_spent`
//! and a `status`. Line items live in [`super::transaction_item`].
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status given to every order the service commits
pub const STATUS_COMPLETED: &str = "completed";

/// Where the order is consumed
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Location {
    #[sea_orm(string_value = "In-store")]
    #[serde(rename = "In-store")]
    InStore,
    #[sea_orm(string_value = "Takeaway")]
    #[serde(rename = "Takeaway")]
    Takeaway,
}

impl Location {
    /// Parses the exact wire value; anything else (including other casings)
    /// is rejected.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "In-store" => Some(Self::InStore),
            "Takeaway" => Some(Self::Takeaway),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStore => "In-store",
            Self::Takeaway => "Takeaway",
        }
    }
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Opaque 16-hex-character identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub transaction_id: String,
    /// Customer who placed the order
    pub customer_id: i64,
    /// Payment method used
    pub payment_method_id: i64,
    pub location: Location,
    /// Sum of the line subtotals at commit time
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_spent: Decimal,
    /// Order status, `"completed"` for everything this service writes
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId"
    )]
    Customer,
    /// Each transaction is paid with one payment method
    #[sea_orm(
        belongs_to = "super::payment_method::Entity",
        from = "Column::PaymentMethodId",
        to = "super::payment_method::Column::PaymentMethodId"
    )]
    PaymentMethod,
    /// One transaction has many line items
    #[sea_orm(has_many = "super::transaction_item::Entity")]
    TransactionItems,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::payment_method::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentMethod.def()
    }
}

impl Related<super::transaction_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
