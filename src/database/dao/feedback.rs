use crate::database::entities::{FeedbackRecord, feedback};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Feedback DAO for database operations
#[derive(Clone)]
pub struct FeedbackDao {
    db: DatabaseConnection,
}

impl FeedbackDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, entry: &FeedbackRecord) -> DatabaseResult<FeedbackRecord> {
        let active_model = feedback::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: Set(entry.user_id),
            guide_id: Set(entry.guide_id),
            safari_id: Set(entry.safari_id),
            rating: Set(entry.rating),
            comment: Set(entry.comment.clone()),
            response: Set(entry.response.clone()),
            created_at: Set(entry.created_at),
            updated_at: Set(entry.updated_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(&self, feedback_id: i32) -> DatabaseResult<Option<FeedbackRecord>> {
        feedback::Entity::find_by_id(feedback_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_by_safari(&self, safari_id: i32) -> DatabaseResult<Vec<FeedbackRecord>> {
        feedback::Entity::find()
            .filter(feedback::Column::SafariId.eq(safari_id))
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_by_user(&self, user_id: i32) -> DatabaseResult<Vec<FeedbackRecord>> {
        feedback::Entity::find()
            .filter(feedback::Column::UserId.eq(user_id))
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_by_guide(&self, guide_id: i32) -> DatabaseResult<Vec<FeedbackRecord>> {
        feedback::Entity::find()
            .filter(feedback::Column::GuideId.eq(guide_id))
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_all(&self) -> DatabaseResult<Vec<FeedbackRecord>> {
        feedback::Entity::find()
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Author edit: rating and comment only
    pub async fn update_review(
        &self,
        feedback_id: i32,
        rating: i32,
        comment: String,
    ) -> DatabaseResult<FeedbackRecord> {
        let active_model = feedback::ActiveModel {
            id: Set(feedback_id),
            rating: Set(rating),
            comment: Set(comment),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Assigned guide's response
    pub async fn set_response(
        &self,
        feedback_id: i32,
        response: String,
    ) -> DatabaseResult<FeedbackRecord> {
        let active_model = feedback::ActiveModel {
            id: Set(feedback_id),
            response: Set(Some(response)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn delete(&self, feedback_id: i32) -> DatabaseResult<()> {
        feedback::Entity::delete_by_id(feedback_id)
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;
        Ok(())
    }
}
