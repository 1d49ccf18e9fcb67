use crate::auth::access::Owned;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A customer's review of a safari, routed to the listing's guide.
///
/// Two-principal resource: `user_id` is the author (owner), `guide_id`
/// the assigned guide who may read it and attach a response but cannot
/// edit or delete the review itself.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub guide_id: i32,
    pub safari_id: i32,
    /// 1..=5
    pub rating: i32,
    pub comment: String,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Model {
    fn owner_id(&self) -> Option<i32> {
        Some(self.user_id)
    }

    fn assignee_id(&self) -> Option<i32> {
        Some(self.guide_id)
    }
}
