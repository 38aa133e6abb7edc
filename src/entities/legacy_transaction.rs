//! Legacy transaction entity - Historical single-line sales imported from CSV.
//!
//! Fields are stored exactly as they appeared in the source file.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions_static")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub transaction_id: String,
    pub item: Option<String>,
    pub quantity: Option<String>,
    pub price_per_unit: Option<String>,
    pub total_spent: Option<String>,
    pub payment_method: Option<String>,
    pub location: Option<String>,
    pub transaction_date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
