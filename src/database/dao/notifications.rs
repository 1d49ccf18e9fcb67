use crate::database::entities::{NotificationRecord, Role, notifications};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Notifications DAO for database operations
#[derive(Clone)]
pub struct NotificationsDao {
    db: DatabaseConnection,
}

impl NotificationsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, entry: &NotificationRecord) -> DatabaseResult<NotificationRecord> {
        let active_model = notifications::ActiveModel {
            id: ActiveValue::NotSet,
            recipient_id: Set(entry.recipient_id),
            recipient_role: Set(entry.recipient_role),
            event_type: Set(entry.event_type),
            message: Set(entry.message.clone()),
            details: Set(entry.details.clone()),
            read: Set(entry.read),
            created_at: Set(entry.created_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(
        &self,
        notification_id: i32,
    ) -> DatabaseResult<Option<NotificationRecord>> {
        notifications::Entity::find_by_id(notification_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// A user's feed: rows addressed to them directly or to their role
    pub async fn list_for_recipient(
        &self,
        user_id: i32,
        role: Role,
        limit: u64,
        offset: u64,
    ) -> DatabaseResult<Vec<NotificationRecord>> {
        notifications::Entity::find()
            .filter(
                notifications::Column::RecipientId
                    .eq(user_id)
                    .or(notifications::Column::RecipientRole.eq(role)),
            )
            .order_by_desc(notifications::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_all(&self, limit: u64, offset: u64) -> DatabaseResult<Vec<NotificationRecord>> {
        notifications::Entity::find()
            .order_by_desc(notifications::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn mark_read(&self, notification_id: i32) -> DatabaseResult<NotificationRecord> {
        let active_model = notifications::ActiveModel {
            id: Set(notification_id),
            read: Set(true),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
