use crate::{
    auth::{
        access::{Action, Relation, ResourceType, authorize, authorize_ownership, permitted},
        principal::{Principal, Role},
    },
    database::entities::{ListingStatus, NotificationEvent, SafariRecord},
    error::AppError,
    notify::{NewNotification, Recipient},
    server::Server,
};
use axum::{
    Json as AxumJson, Router,
    extract::{Path, State},
    response::Json,
    routing::{get, put},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SafariRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: Decimal,
    pub duration_days: i32,
    pub capacity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ListingStatus,
}

fn validate_listing(request: &SafariRequest) -> Result<(), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title cannot be empty".to_string()));
    }
    if request.price <= Decimal::ZERO {
        return Err(AppError::BadRequest("Price must be positive".to_string()));
    }
    if request.duration_days < 1 {
        return Err(AppError::BadRequest(
            "Duration must be at least one day".to_string(),
        ));
    }
    if request.capacity < 1 {
        return Err(AppError::BadRequest(
            "Capacity must be at least one".to_string(),
        ));
    }
    Ok(())
}

/// Load a safari or map its absence to 404. Existence is always decided
/// before ownership, so a denied caller learns nothing it could not learn
/// from the catalog.
async fn load_safari(server: &Server, safari_id: i32) -> Result<SafariRecord, AppError> {
    server
        .database
        .safaris()
        .find_by_id(safari_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Safari not found".to_string()))
}

/// Catalog: approved listings only. Admins see every listing whatever
/// its review state, so pending submissions can be found without
/// chasing notification ids.
pub async fn list_safaris(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<Vec<SafariRecord>>, AppError> {
    let safaris = if principal.is_admin() {
        server.database.safaris().list_all().await?
    } else {
        server.database.safaris().list_approved().await?
    };
    Ok(Json(safaris))
}

/// A guide's own listings, whatever their review state
pub async fn list_own_safaris(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<Vec<SafariRecord>>, AppError> {
    authorize(&principal, &[Role::Guide, Role::Admin])?;

    let safaris = server.database.safaris().list_by_guide(principal.id).await?;
    Ok(Json(safaris))
}

pub async fn get_safari(
    State(server): State<Server>,
    principal: Principal,
    Path(safari_id): Path<i32>,
) -> Result<Json<SafariRecord>, AppError> {
    let safari = load_safari(&server, safari_id).await?;

    // Approved listings are catalog-public; drafts are visible to the
    // owning guide and admins only.
    if !safari.status.is_approved() {
        authorize_ownership(&principal, &safari, Relation::Owner)?;
    }

    Ok(Json(safari))
}

pub async fn create_safari(
    State(server): State<Server>,
    principal: Principal,
    AxumJson(request): AxumJson<SafariRequest>,
) -> Result<Json<SafariRecord>, AppError> {
    if !permitted(principal.role, ResourceType::Safari, Action::Create) {
        return Err(AppError::Forbidden(
            "Only guides can create safari listings".to_string(),
        ));
    }
    validate_listing(&request)?;

    let now = Utc::now();
    let safari = SafariRecord {
        id: 0,
        guide_id: principal.id,
        title: request.title,
        description: request.description,
        location: request.location,
        price: request.price,
        duration_days: request.duration_days,
        capacity: request.capacity,
        status: ListingStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    let safari = server.database.safaris().create(&safari).await?;
    info!(safari_id = %safari.id, guide_id = %principal.id, "Safari listing created");

    server
        .notifier
        .emit(
            NewNotification::new(
                NotificationEvent::ListingSubmitted,
                Recipient::Role(Role::Admin),
                format!("Safari '{}' awaits review", safari.title),
            )
            .with_details(serde_json::json!({ "safari_id": safari.id })),
        )
        .await;

    Ok(Json(safari))
}

pub async fn update_safari(
    State(server): State<Server>,
    principal: Principal,
    Path(safari_id): Path<i32>,
    AxumJson(request): AxumJson<SafariRequest>,
) -> Result<Json<SafariRecord>, AppError> {
    validate_listing(&request)?;

    let safari = load_safari(&server, safari_id).await?;
    authorize_ownership(&principal, &safari, Relation::Owner)?;

    // Content edits drop the listing back to pending review
    let updated = server
        .database
        .safaris()
        .update_content(
            safari_id,
            request.title,
            request.description,
            request.location,
            request.price,
            request.duration_days,
            request.capacity,
        )
        .await?;
    info!(safari_id = %safari_id, "Safari listing updated, back to review");

    server
        .notifier
        .emit(
            NewNotification::new(
                NotificationEvent::ListingSubmitted,
                Recipient::Role(Role::Admin),
                format!("Safari '{}' was edited and awaits review", updated.title),
            )
            .with_details(serde_json::json!({ "safari_id": updated.id })),
        )
        .await;

    Ok(Json(updated))
}

pub async fn delete_safari(
    State(server): State<Server>,
    principal: Principal,
    Path(safari_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let safari = load_safari(&server, safari_id).await?;
    authorize_ownership(&principal, &safari, Relation::Owner)?;

    server.database.safaris().delete(safari_id).await?;
    info!(safari_id = %safari_id, "Safari listing deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Review decision on a pending listing. Admin-only by explicit role
/// check rather than route placement, so the decision reads at the call
/// site.
pub async fn update_safari_status(
    State(server): State<Server>,
    principal: Principal,
    Path(safari_id): Path<i32>,
    AxumJson(request): AxumJson<UpdateStatusRequest>,
) -> Result<Json<SafariRecord>, AppError> {
    authorize(&principal, &[Role::Admin])?;

    let safari = load_safari(&server, safari_id).await?;
    let updated = server
        .database
        .safaris()
        .update_status(safari_id, request.status)
        .await?;
    info!(safari_id = %safari_id, status = ?request.status, "Safari review decision recorded");

    let event = match request.status {
        ListingStatus::Approved => NotificationEvent::ListingApproved,
        ListingStatus::Rejected => NotificationEvent::ListingRejected,
        ListingStatus::Pending => NotificationEvent::ListingSubmitted,
    };
    server
        .notifier
        .emit(
            NewNotification::new(
                event,
                Recipient::User(safari.guide_id),
                format!("Your safari '{}' is now {:?}", safari.title, request.status),
            )
            .with_details(serde_json::json!({ "safari_id": safari.id })),
        )
        .await;

    Ok(Json(updated))
}

pub fn create_safari_routes() -> Router<Server> {
    Router::new()
        .route("/safaris", get(list_safaris).post(create_safari))
        .route("/safaris/mine", get(list_own_safaris))
        .route(
            "/safaris/{safari_id}",
            get(get_safari).put(update_safari).delete(delete_safari),
        )
        .route("/safaris/{safari_id}/status", put(update_safari_status))
}
