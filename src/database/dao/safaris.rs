use crate::database::entities::{ListingStatus, SafariRecord, safaris};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Safari listings DAO for database operations
#[derive(Clone)]
pub struct SafarisDao {
    db: DatabaseConnection,
}

impl SafarisDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, safari: &SafariRecord) -> DatabaseResult<SafariRecord> {
        let active_model = safaris::ActiveModel {
            id: ActiveValue::NotSet,
            guide_id: Set(safari.guide_id),
            title: Set(safari.title.clone()),
            description: Set(safari.description.clone()),
            location: Set(safari.location.clone()),
            price: Set(safari.price),
            duration_days: Set(safari.duration_days),
            capacity: Set(safari.capacity),
            status: Set(safari.status),
            created_at: Set(safari.created_at),
            updated_at: Set(safari.updated_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(&self, safari_id: i32) -> DatabaseResult<Option<SafariRecord>> {
        safaris::Entity::find_by_id(safari_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Public catalog: approved listings only, newest first
    pub async fn list_approved(&self) -> DatabaseResult<Vec<SafariRecord>> {
        safaris::Entity::find()
            .filter(safaris::Column::Status.eq(ListingStatus::Approved))
            .order_by_desc(safaris::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_by_guide(&self, guide_id: i32) -> DatabaseResult<Vec<SafariRecord>> {
        safaris::Entity::find()
            .filter(safaris::Column::GuideId.eq(guide_id))
            .order_by_desc(safaris::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_all(&self) -> DatabaseResult<Vec<SafariRecord>> {
        safaris::Entity::find()
            .order_by_desc(safaris::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Update listing content; re-submits the listing for review
    #[allow(clippy::too_many_arguments)]
    pub async fn update_content(
        &self,
        safari_id: i32,
        title: String,
        description: String,
        location: String,
        price: rust_decimal::Decimal,
        duration_days: i32,
        capacity: i32,
    ) -> DatabaseResult<SafariRecord> {
        let active_model = safaris::ActiveModel {
            id: Set(safari_id),
            title: Set(title),
            description: Set(description),
            location: Set(location),
            price: Set(price),
            duration_days: Set(duration_days),
            capacity: Set(capacity),
            status: Set(ListingStatus::Pending),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn update_status(
        &self,
        safari_id: i32,
        status: ListingStatus,
    ) -> DatabaseResult<SafariRecord> {
        let active_model = safaris::ActiveModel {
            id: Set(safari_id),
            status: Set(status),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn delete(&self, safari_id: i32) -> DatabaseResult<()> {
        safaris::Entity::delete_by_id(safari_id)
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;
        Ok(())
    }
}
