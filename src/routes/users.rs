use crate::{
    database::entities::{Role, UserRecord, UserState},
    error::AppError,
    notify::{NewNotification, Recipient},
    server::Server,
};
use axum::{
    Json as AxumJson, Router,
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// User representation returned by the API. Never carries the password
/// hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub state: UserState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            state: user.state,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
    pub count: usize,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Maximum number of users to return (default: 50, max: 500)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of users to skip for pagination (default: 0)
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserStateRequest {
    pub state: UserState,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub role: Role,
}

/// List all users with pagination. Admin only; the admin middleware on
/// this route group has already enforced that.
pub async fn list_users(
    State(server): State<Server>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserListResponse>, AppError> {
    if query.limit > 500 {
        return Err(AppError::BadRequest("Limit cannot exceed 500".to_string()));
    }

    let total = server.database.users().count().await?;
    let users = server.database.users().list(query.limit, query.offset).await?;

    let user_responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(UserListResponse {
        count: user_responses.len(),
        total: total as usize,
        users: user_responses,
        offset: query.offset,
        limit: query.limit,
    }))
}

pub async fn get_user_by_id(
    State(server): State<Server>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = server
        .database
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user_state(
    State(server): State<Server>,
    Path(user_id): Path<i32>,
    AxumJson(request): AxumJson<UpdateUserStateRequest>,
) -> Result<Json<UserResponse>, AppError> {
    server
        .database
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let updated = server
        .database
        .users()
        .update_state(user_id, request.state)
        .await?;
    info!(user_id = %user_id, state = ?request.state, "Admin updated user state");

    server
        .notifier
        .emit(NewNotification::new(
            crate::database::entities::NotificationEvent::AccountUpdated,
            Recipient::User(user_id),
            "Your account state was changed by an administrator",
        ))
        .await;

    Ok(Json(UserResponse::from(updated)))
}

pub async fn update_user_role(
    State(server): State<Server>,
    Path(user_id): Path<i32>,
    AxumJson(request): AxumJson<UpdateUserRoleRequest>,
) -> Result<Json<UserResponse>, AppError> {
    server
        .database
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let updated = server
        .database
        .users()
        .update_role(user_id, request.role)
        .await?;
    info!(user_id = %user_id, role = %request.role.as_str(), "Admin updated user role");

    server
        .notifier
        .emit(NewNotification::new(
            crate::database::entities::NotificationEvent::AccountUpdated,
            Recipient::User(user_id),
            format!("Your account role is now '{}'", request.role.as_str()),
        ))
        .await;

    Ok(Json(UserResponse::from(updated)))
}

pub async fn delete_user(
    State(server): State<Server>,
    Path(user_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    server
        .database
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    server.database.users().delete(user_id).await?;
    info!(user_id = %user_id, "Admin deleted user");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Admin user management routes
pub fn create_admin_user_routes() -> Router<Server> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{user_id}", get(get_user_by_id).delete(delete_user))
        .route("/admin/users/{user_id}/state", put(update_user_state))
        .route("/admin/users/{user_id}/role", put(update_user_role))
}
