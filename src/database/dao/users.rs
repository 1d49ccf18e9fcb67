use crate::database::entities::{Role, UserRecord, UserState, users};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Users DAO for database operations
#[derive(Clone)]
pub struct UsersDao {
    db: DatabaseConnection,
}

impl UsersDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new user, letting the database assign the id
    pub async fn create(&self, user: &UserRecord) -> DatabaseResult<UserRecord> {
        let active_model = users::ActiveModel {
            id: ActiveValue::NotSet,
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            display_name: Set(user.display_name.clone()),
            role: Set(user.role),
            state: Set(user.state),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
            last_login: Set(user.last_login),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(&self, user_id: i32) -> DatabaseResult<Option<UserRecord>> {
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<UserRecord>> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Update profile fields the user controls
    pub async fn update_profile(
        &self,
        user_id: i32,
        display_name: Option<String>,
        password_hash: Option<String>,
    ) -> DatabaseResult<UserRecord> {
        let mut active_model = users::ActiveModel {
            id: Set(user_id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = display_name {
            active_model.display_name = Set(Some(name));
        }
        if let Some(hash) = password_hash {
            active_model.password_hash = Set(hash);
        }

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn update_last_login(&self, user_id: i32) -> DatabaseResult<UserRecord> {
        let active_model = users::ActiveModel {
            id: Set(user_id),
            last_login: Set(Some(Utc::now())),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn update_state(&self, user_id: i32, state: UserState) -> DatabaseResult<UserRecord> {
        let active_model = users::ActiveModel {
            id: Set(user_id),
            state: Set(state),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn update_role(&self, user_id: i32, role: Role) -> DatabaseResult<UserRecord> {
        let active_model = users::ActiveModel {
            id: Set(user_id),
            role: Set(role),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn delete(&self, user_id: i32) -> DatabaseResult<()> {
        users::Entity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;
        Ok(())
    }

    pub async fn list(&self, limit: u64, offset: u64) -> DatabaseResult<Vec<UserRecord>> {
        users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        users::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
