use crate::{
    auth::{
        access::{Action, Relation, ResourceType, authorize_ownership, permitted},
        principal::Principal,
    },
    database::entities::{FeedbackRecord, NotificationEvent},
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
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub safari_id: i32,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFeedbackRequest {
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponseRequest {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackListQuery {
    pub safari_id: Option<i32>,
}

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

async fn load_feedback(server: &Server, feedback_id: i32) -> Result<FeedbackRecord, AppError> {
    server
        .database
        .feedback()
        .find_by_id(feedback_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))
}

/// Reviews for one safari (any authenticated caller, the catalog shows
/// them). Without a safari filter, a guide gets the reviews addressed
/// to them and an admin gets everything; a customer's own reviews live
/// at `/feedback/mine`.
pub async fn list_feedback(
    State(server): State<Server>,
    principal: Principal,
    Query(query): Query<FeedbackListQuery>,
) -> Result<Json<Vec<FeedbackRecord>>, AppError> {
    let entries = match query.safari_id {
        Some(safari_id) => server.database.feedback().list_by_safari(safari_id).await?,
        None => {
            if principal.is_admin() {
                server.database.feedback().list_all().await?
            } else {
                server.database.feedback().list_by_guide(principal.id).await?
            }
        }
    };
    Ok(Json(entries))
}

/// Reviews authored by the caller
pub async fn list_own_feedback(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<Vec<FeedbackRecord>>, AppError> {
    let entries = server.database.feedback().list_by_user(principal.id).await?;
    Ok(Json(entries))
}

pub async fn get_feedback(
    State(server): State<Server>,
    principal: Principal,
    Path(feedback_id): Path<i32>,
) -> Result<Json<FeedbackRecord>, AppError> {
    let entry = load_feedback(&server, feedback_id).await?;
    // Author or assigned guide; admins pass inside the guard
    authorize_ownership(&principal, &entry, Relation::OwnerOrAssignee)?;

    Ok(Json(entry))
}

/// Create a review. The safari's guide is resolved server-side and
/// recorded as the assignee; the client never chooses who a review is
/// routed to.
pub async fn create_feedback(
    State(server): State<Server>,
    principal: Principal,
    AxumJson(request): AxumJson<FeedbackRequest>,
) -> Result<Json<FeedbackRecord>, AppError> {
    if !permitted(principal.role, ResourceType::Feedback, Action::Create) {
        return Err(AppError::Forbidden(
            "This account type cannot leave reviews".to_string(),
        ));
    }
    validate_rating(request.rating)?;

    let safari = server
        .database
        .safaris()
        .find_by_id(request.safari_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Safari not found".to_string()))?;

    let now = Utc::now();
    let entry = FeedbackRecord {
        id: 0,
        user_id: principal.id,
        guide_id: safari.guide_id,
        safari_id: safari.id,
        rating: request.rating,
        comment: request.comment,
        response: None,
        created_at: now,
        updated_at: now,
    };

    let entry = server.database.feedback().create(&entry).await?;
    info!(feedback_id = %entry.id, safari_id = %safari.id, "Feedback submitted");

    server
        .notifier
        .emit(
            NewNotification::new(
                NotificationEvent::FeedbackReceived,
                Recipient::User(safari.guide_id),
                format!("New {}-star review on '{}'", entry.rating, safari.title),
            )
            .with_details(serde_json::json!({ "feedback_id": entry.id })),
        )
        .await;

    Ok(Json(entry))
}

/// Author edit: rating and comment. The assigned guide cannot edit the
/// review body, only respond to it.
pub async fn update_feedback(
    State(server): State<Server>,
    principal: Principal,
    Path(feedback_id): Path<i32>,
    AxumJson(request): AxumJson<UpdateFeedbackRequest>,
) -> Result<Json<FeedbackRecord>, AppError> {
    validate_rating(request.rating)?;

    let entry = load_feedback(&server, feedback_id).await?;
    authorize_ownership(&principal, &entry, Relation::Owner)?;

    let updated = server
        .database
        .feedback()
        .update_review(feedback_id, request.rating, request.comment)
        .await?;

    Ok(Json(updated))
}

/// Guide response: assignee-only. The author gets notified.
pub async fn respond_to_feedback(
    State(server): State<Server>,
    principal: Principal,
    Path(feedback_id): Path<i32>,
    AxumJson(request): AxumJson<ResponseRequest>,
) -> Result<Json<FeedbackRecord>, AppError> {
    if request.response.trim().is_empty() {
        return Err(AppError::BadRequest("Response cannot be empty".to_string()));
    }

    let entry = load_feedback(&server, feedback_id).await?;
    authorize_ownership(&principal, &entry, Relation::Assignee)?;

    let updated = server
        .database
        .feedback()
        .set_response(feedback_id, request.response)
        .await?;
    info!(feedback_id = %feedback_id, "Guide responded to feedback");

    server
        .notifier
        .emit(
            NewNotification::new(
                NotificationEvent::FeedbackResponded,
                Recipient::User(entry.user_id),
                "The guide responded to your review",
            )
            .with_details(serde_json::json!({ "feedback_id": feedback_id })),
        )
        .await;

    Ok(Json(updated))
}

pub async fn delete_feedback(
    State(server): State<Server>,
    principal: Principal,
    Path(feedback_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let entry = load_feedback(&server, feedback_id).await?;
    authorize_ownership(&principal, &entry, Relation::Owner)?;

    server.database.feedback().delete(feedback_id).await?;
    info!(feedback_id = %feedback_id, "Feedback deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub fn create_feedback_routes() -> Router<Server> {
    Router::new()
        .route("/feedback", get(list_feedback).post(create_feedback))
        .route("/feedback/mine", get(list_own_feedback))
        .route(
            "/feedback/{feedback_id}",
            get(get_feedback)
                .put(update_feedback)
                .delete(delete_feedback),
        )
        .route("/feedback/{feedback_id}/response", put(respond_to_feedback))
}
