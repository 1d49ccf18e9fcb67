use crate::{
    auth::{
        access::{Action, Relation, ResourceType, authorize_ownership, permitted},
        principal::Principal,
    },
    database::entities::{BookingRecord, BookingStatus, NotificationEvent},
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
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub safari_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_party_size")]
    pub party_size: i32,
}

fn default_party_size() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// What a booking points at, with the provider who services it. Prices
/// come from the loaded listing, never from the request body.
struct BookingTarget {
    provider_id: i32,
    total_price: Decimal,
}

fn rental_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Resolve and price the booking target. Exactly one of `safari_id` and
/// `vehicle_id` must be set, and the listing must be approved.
async fn resolve_target(
    server: &Server,
    request: &BookingRequest,
) -> Result<BookingTarget, AppError> {
    if request.party_size < 1 {
        return Err(AppError::BadRequest(
            "Party size must be at least one".to_string(),
        ));
    }

    match (request.safari_id, request.vehicle_id) {
        (Some(safari_id), None) => {
            let safari = server
                .database
                .safaris()
                .find_by_id(safari_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Safari not found".to_string()))?;
            if !safari.status.is_approved() {
                return Err(AppError::NotFound("Safari not found".to_string()));
            }
            if request.party_size > safari.capacity {
                return Err(AppError::BadRequest(format!(
                    "Party size exceeds safari capacity of {}",
                    safari.capacity
                )));
            }
            if request.end_date < request.start_date {
                return Err(AppError::BadRequest(
                    "End date cannot precede start date".to_string(),
                ));
            }

            // Package pricing: per-person price regardless of dates
            Ok(BookingTarget {
                provider_id: safari.guide_id,
                total_price: safari.price * Decimal::from(request.party_size),
            })
        }
        (None, Some(vehicle_id)) => {
            let vehicle = server
                .database
                .vehicles()
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
            if !vehicle.status.is_approved() {
                return Err(AppError::NotFound("Vehicle not found".to_string()));
            }
            if request.party_size > vehicle.seats {
                return Err(AppError::BadRequest(format!(
                    "Party size exceeds vehicle capacity of {}",
                    vehicle.seats
                )));
            }

            let days = rental_days(request.start_date, request.end_date);
            if days < 1 {
                return Err(AppError::BadRequest(
                    "Rental must span at least one day".to_string(),
                ));
            }

            Ok(BookingTarget {
                provider_id: vehicle.owner_id,
                total_price: vehicle.daily_rate * Decimal::from(days),
            })
        }
        _ => Err(AppError::BadRequest(
            "Booking must reference exactly one safari or vehicle".to_string(),
        )),
    }
}

async fn load_booking(server: &Server, booking_id: i32) -> Result<BookingRecord, AppError> {
    server
        .database
        .bookings()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
}

/// The provider behind a booking: the booked safari's guide or the
/// booked vehicle's owner.
async fn booking_provider(server: &Server, booking: &BookingRecord) -> Result<i32, AppError> {
    if let Some(safari_id) = booking.safari_id {
        let safari = server
            .database
            .safaris()
            .find_by_id(safari_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Safari not found".to_string()))?;
        return Ok(safari.guide_id);
    }
    if let Some(vehicle_id) = booking.vehicle_id {
        let vehicle = server
            .database
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        return Ok(vehicle.owner_id);
    }
    Err(AppError::Internal(
        "Booking references no safari or vehicle".to_string(),
    ))
}

pub async fn create_booking(
    State(server): State<Server>,
    principal: Principal,
    AxumJson(request): AxumJson<BookingRequest>,
) -> Result<Json<BookingRecord>, AppError> {
    if !permitted(principal.role, ResourceType::Booking, Action::Create) {
        return Err(AppError::Forbidden(
            "This account type cannot create bookings".to_string(),
        ));
    }

    let target = resolve_target(&server, &request).await?;

    let now = Utc::now();
    let booking = BookingRecord {
        id: 0,
        user_id: principal.id,
        safari_id: request.safari_id,
        vehicle_id: request.vehicle_id,
        start_date: request.start_date,
        end_date: request.end_date,
        party_size: request.party_size,
        total_price: target.total_price,
        status: BookingStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    let booking = server.database.bookings().create(&booking).await?;
    info!(
        booking_id = %booking.id,
        user_id = %principal.id,
        total_price = %booking.total_price,
        "Booking created"
    );

    server
        .notifier
        .emit(
            NewNotification::new(
                NotificationEvent::BookingCreated,
                Recipient::User(target.provider_id),
                "You have a new booking request",
            )
            .with_details(serde_json::json!({ "booking_id": booking.id })),
        )
        .await;

    Ok(Json(booking))
}

/// A customer's own bookings; admins see the whole book.
pub async fn list_bookings(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    let bookings = if principal.is_admin() {
        server.database.bookings().list_all().await?
    } else {
        server.database.bookings().list_by_user(principal.id).await?
    };
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(server): State<Server>,
    principal: Principal,
    Path(booking_id): Path<i32>,
) -> Result<Json<BookingRecord>, AppError> {
    let booking = load_booking(&server, booking_id).await?;
    authorize_ownership(&principal, &booking, Relation::Owner)?;

    Ok(Json(booking))
}

/// Status transitions. The customer may cancel; the provider servicing
/// the booking may confirm or complete it; admins may do either.
/// Settled bookings accept no further transitions.
pub async fn update_booking_status(
    State(server): State<Server>,
    principal: Principal,
    Path(booking_id): Path<i32>,
    AxumJson(request): AxumJson<UpdateBookingStatusRequest>,
) -> Result<Json<BookingRecord>, AppError> {
    let booking = load_booking(&server, booking_id).await?;

    if booking.status.is_settled() {
        return Err(AppError::BadRequest(format!(
            "Booking is already {:?} and cannot change",
            booking.status
        )));
    }

    let provider_id = booking_provider(&server, &booking).await?;

    if !principal.is_admin() {
        let allowed = match request.status {
            BookingStatus::Cancelled => booking.user_id == principal.id,
            BookingStatus::Confirmed | BookingStatus::Completed => provider_id == principal.id,
            BookingStatus::Pending => false,
        };
        if !allowed {
            return Err(AppError::Forbidden(
                "Not permitted to set this booking status".to_string(),
            ));
        }
    }

    let updated = server
        .database
        .bookings()
        .update_status(booking_id, request.status)
        .await?;
    info!(booking_id = %booking_id, status = ?request.status, "Booking status updated");

    // Notify whichever side did not make the change
    let (event, recipient) = match request.status {
        BookingStatus::Cancelled => (
            NotificationEvent::BookingCancelled,
            if principal.id == booking.user_id {
                Recipient::User(provider_id)
            } else {
                Recipient::User(booking.user_id)
            },
        ),
        _ => (
            NotificationEvent::BookingConfirmed,
            Recipient::User(booking.user_id),
        ),
    };
    server
        .notifier
        .emit(
            NewNotification::new(
                event,
                recipient,
                format!("Booking #{} is now {:?}", booking_id, request.status),
            )
            .with_details(serde_json::json!({ "booking_id": booking_id })),
        )
        .await;

    Ok(Json(updated))
}

pub async fn delete_booking(
    State(server): State<Server>,
    principal: Principal,
    Path(booking_id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let booking = load_booking(&server, booking_id).await?;
    authorize_ownership(&principal, &booking, Relation::Owner)?;

    server.database.bookings().delete(booking_id).await?;
    info!(booking_id = %booking_id, "Booking deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub fn create_booking_routes() -> Router<Server> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route(
            "/bookings/{booking_id}",
            get(get_booking).delete(delete_booking),
        )
        .route("/bookings/{booking_id}/status", put(update_booking_status))
}
