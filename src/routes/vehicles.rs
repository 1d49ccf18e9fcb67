use crate::{
    auth::{
        access::{Action, Relation, ResourceType, authorize, authorize_ownership, permitted},
        principal::{Principal, Role},
    },
    database::entities::{ListingStatus, NotificationEvent, VehicleRecord},
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
pub struct VehicleRequest {
    pub make: String,
    pub model: String,
    pub category: String,
    pub seats: i32,
    pub daily_rate: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ListingStatus,
}

fn validate_vehicle(request: &VehicleRequest) -> Result<(), AppError> {
    if request.make.trim().is_empty() || request.model.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Make and model cannot be empty".to_string(),
        ));
    }
    if request.seats < 1 {
        return Err(AppError::BadRequest(
            "Vehicle must have at least one seat".to_string(),
        ));
    }
    if request.daily_rate <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Daily rate must be positive".to_string(),
        ));
    }
    Ok(())
}

async fn load_vehicle(server: &Server, vehicle_id: i32) -> Result<VehicleRecord, AppError> {
    server
        .database
        .vehicles()
        .find_by_id(vehicle_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
}

/// Catalog: approved vehicles only. Admins see the whole fleet across
/// every owner and review state.
pub async fn list_vehicles(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<Vec<VehicleRecord>>, AppError> {
    let vehicles = if principal.is_admin() {
        server.database.vehicles().list_all().await?
    } else {
        server.database.vehicles().list_approved().await?
    };
    Ok(Json(vehicles))
}

/// An owner's fleet, whatever its review state
pub async fn list_own_vehicles(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<Vec<VehicleRecord>>, AppError> {
    authorize(&principal, &[Role::VehicleOwner, Role::Admin])?;

    let vehicles = server.database.vehicles().list_by_owner(principal.id).await?;
    Ok(Json(vehicles))
}

pub async fn get_vehicle(
    State(server): State<Server>,
    principal: Principal,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<VehicleRecord>, AppError> {
    let vehicle = load_vehicle(&server, vehicle_id).await?;

    if !vehicle.status.is_approved() {
        authorize_ownership(&principal, &vehicle, Relation::Owner)?;
    }

    Ok(Json(vehicle))
}

pub async fn create_vehicle(
    State(server): State<Server>,
    principal: Principal,
    AxumJson(request): AxumJson<VehicleRequest>,
) -> Result<Json<VehicleRecord>, AppError> {
    if !permitted(principal.role, ResourceType::Vehicle, Action::Create) {
        return Err(AppError::Forbidden(
            "Only vehicle owners can list vehicles".to_string(),
        ));
    }
    validate_vehicle(&request)?;

    let now = Utc::now();
    let vehicle = VehicleRecord {
        id: 0,
        owner_id: principal.id,
        make: request.make,
        model: request.model,
        category: request.category,
        seats: request.seats,
        daily_rate: request.daily_rate,
        status: ListingStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    let vehicle = server.database.vehicles().create(&vehicle).await?;
    info!(vehicle_id = %vehicle.id, owner_id = %principal.id, "Vehicle listed");

    server
        .notifier
        .emit(
            NewNotification::new(
                NotificationEvent::ListingSubmitted,
                Recipient::Role(Role::Admin),
                format!("Vehicle '{} {}' awaits review", vehicle.make, vehicle.model),
            )
            .with_details(serde_json::json!({ "vehicle_id": vehicle.id })),
        )
        .await;

    Ok(Json(vehicle))
}

pub async fn update_vehicle(
    State(server): State<Server>,
    principal: Principal,
    Path(vehicle_id): Path<i32>,
    AxumJson(request): AxumJson<VehicleRequest>,
) -> Result<Json<VehicleRecord>, AppError> {
    validate_vehicle(&request)?;

    let vehicle = load_vehicle(&server, vehicle_id).await?;
    authorize_ownership(&principal, &vehicle, Relation::Owner)?;

    let updated = server
        .database
        .vehicles()
        .update_content(
            vehicle_id,
            request.make,
            request.model,
            request.category,
            request.seats,
            request.daily_rate,
        )
        .await?;
    info!(vehicle_id = %vehicle_id, "Vehicle updated, back to review");

    server
        .notifier
        .emit(
            NewNotification::new(
                NotificationEvent::ListingSubmitted,
                Recipient::Role(Role::Admin),
                format!(
                    "Vehicle '{} {}' was edited and awaits review",
                    updated.make, updated.model
                ),
            )
            .with_details(serde_json::json!({ "vehicle_id": updated.id })),
        )
        .await;

    Ok(Json(updated))
}

pub async fn delete_vehicle(
    State(server): State<Server>,
    principal: Principal,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let vehicle = load_vehicle(&server, vehicle_id).await?;
    authorize_ownership(&principal, &vehicle, Relation::Owner)?;

    server.database.vehicles().delete(vehicle_id).await?;
    info!(vehicle_id = %vehicle_id, "Vehicle deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Review decision on a pending vehicle. Admin-only by explicit role
/// check.
pub async fn update_vehicle_status(
    State(server): State<Server>,
    principal: Principal,
    Path(vehicle_id): Path<i32>,
    AxumJson(request): AxumJson<UpdateStatusRequest>,
) -> Result<Json<VehicleRecord>, AppError> {
    authorize(&principal, &[Role::Admin])?;

    let vehicle = load_vehicle(&server, vehicle_id).await?;
    let updated = server
        .database
        .vehicles()
        .update_status(vehicle_id, request.status)
        .await?;
    info!(vehicle_id = %vehicle_id, status = ?request.status, "Vehicle review decision recorded");

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
                Recipient::User(vehicle.owner_id),
                format!(
                    "Your vehicle '{} {}' is now {:?}",
                    vehicle.make, vehicle.model, request.status
                ),
            )
            .with_details(serde_json::json!({ "vehicle_id": vehicle.id })),
        )
        .await;

    Ok(Json(updated))
}

pub fn create_vehicle_routes() -> Router<Server> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/mine", get(list_own_vehicles))
        .route(
            "/vehicles/{vehicle_id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/vehicles/{vehicle_id}/status", put(update_vehicle_status))
}
