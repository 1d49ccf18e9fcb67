use crate::auth::access::Owned;
use crate::database::entities::users::Role;
use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

/// Event types carried on the notification side-channel
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum NotificationEvent {
    #[sea_orm(string_value = "listing_submitted")]
    ListingSubmitted,
    #[sea_orm(string_value = "listing_approved")]
    ListingApproved,
    #[sea_orm(string_value = "listing_rejected")]
    ListingRejected,
    #[sea_orm(string_value = "booking_created")]
    BookingCreated,
    #[sea_orm(string_value = "booking_confirmed")]
    BookingConfirmed,
    #[sea_orm(string_value = "booking_cancelled")]
    BookingCancelled,
    #[sea_orm(string_value = "feedback_received")]
    FeedbackReceived,
    #[sea_orm(string_value = "feedback_responded")]
    FeedbackResponded,
    #[sea_orm(string_value = "account_updated")]
    AccountUpdated,
}

/// A best-effort notification record. Addressed either to one user
/// (`recipient_id`) or to a whole role (`recipient_role`, e.g. all
/// admins reviewing new listings). Role-addressed rows have no owner,
/// so only admins can read them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub recipient_id: Option<i32>,
    #[sea_orm(column_type = "String(StringLen::N(16))", nullable)]
    pub recipient_role: Option<Role>,
    pub event_type: NotificationEvent,
    pub message: String,
    /// JSON blob with event-specific context
    pub details: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Model {
    fn owner_id(&self) -> Option<i32> {
        self.recipient_id
    }
}
