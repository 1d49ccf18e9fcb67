use crate::{
    auth::{
        access::{Relation, authorize_ownership},
        principal::Principal,
    },
    database::entities::NotificationRecord,
    error::AppError,
    server::Server,
};
use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

/// The caller's feed: rows addressed to them directly plus rows
/// addressed to their role.
pub async fn list_notifications(
    State(server): State<Server>,
    principal: Principal,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<NotificationRecord>>, AppError> {
    if query.limit > 500 {
        return Err(AppError::BadRequest("Limit cannot exceed 500".to_string()));
    }

    let rows = server
        .database
        .notifications()
        .list_for_recipient(principal.id, principal.role, query.limit, query.offset)
        .await?;
    Ok(Json(rows))
}

/// Mark one notification read. Role-addressed rows have no single owner,
/// so only admins can mark those; user-addressed rows follow the usual
/// ownership guard.
pub async fn mark_notification_read(
    State(server): State<Server>,
    principal: Principal,
    Path(notification_id): Path<i32>,
) -> Result<Json<NotificationRecord>, AppError> {
    let row = server
        .database
        .notifications()
        .find_by_id(notification_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    authorize_ownership(&principal, &row, Relation::Owner)?;

    let updated = server
        .database
        .notifications()
        .mark_read(notification_id)
        .await?;
    Ok(Json(updated))
}

/// Admin view of the whole side-channel, mostly for auditing delivery.
pub async fn list_all_notifications(
    State(server): State<Server>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<NotificationRecord>>, AppError> {
    if query.limit > 500 {
        return Err(AppError::BadRequest("Limit cannot exceed 500".to_string()));
    }

    let rows = server
        .database
        .notifications()
        .list_all(query.limit, query.offset)
        .await?;
    Ok(Json(rows))
}

pub fn create_notification_routes() -> Router<Server> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route(
            "/notifications/{notification_id}/read",
            put(mark_notification_read),
        )
}

pub fn create_admin_notification_routes() -> Router<Server> {
    Router::new().route("/admin/notifications", get(list_all_notifications))
}
