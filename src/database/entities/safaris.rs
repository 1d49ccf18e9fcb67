use crate::auth::access::Owned;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

/// Review state shared by safari and vehicle listings. New listings start
/// pending and only appear in the public catalog once an admin approves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[derive(Default)]
pub enum ListingStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(rename = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    #[serde(rename = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    #[serde(rename = "rejected")]
    Rejected,
}

impl ListingStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, ListingStatus::Approved)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "safaris")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guide_id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Price per person for the whole package
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub duration_days: i32,
    pub capacity: i32,
    #[sea_orm(column_type = "String(StringLen::N(16))", default_value = "pending")]
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Model {
    fn owner_id(&self) -> Option<i32> {
        Some(self.guide_id)
    }
}
