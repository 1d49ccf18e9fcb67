use crate::auth::access::Owned;
use crate::database::entities::safaris::ListingStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub make: String,
    pub model: String,
    /// e.g. "4x4", "minibus", "camper"
    pub category: String,
    pub seats: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub daily_rate: Decimal,
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
        Some(self.owner_id)
    }
}
