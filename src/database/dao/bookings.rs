use crate::database::entities::{BookingRecord, BookingStatus, bookings};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Bookings DAO for database operations
#[derive(Clone)]
pub struct BookingsDao {
    db: DatabaseConnection,
}

impl BookingsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, booking: &BookingRecord) -> DatabaseResult<BookingRecord> {
        let active_model = bookings::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: Set(booking.user_id),
            safari_id: Set(booking.safari_id),
            vehicle_id: Set(booking.vehicle_id),
            start_date: Set(booking.start_date),
            end_date: Set(booking.end_date),
            party_size: Set(booking.party_size),
            total_price: Set(booking.total_price),
            status: Set(booking.status),
            created_at: Set(booking.created_at),
            updated_at: Set(booking.updated_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(&self, booking_id: i32) -> DatabaseResult<Option<BookingRecord>> {
        bookings::Entity::find_by_id(booking_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_by_user(&self, user_id: i32) -> DatabaseResult<Vec<BookingRecord>> {
        bookings::Entity::find()
            .filter(bookings::Column::UserId.eq(user_id))
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_all(&self) -> DatabaseResult<Vec<BookingRecord>> {
        bookings::Entity::find()
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn update_status(
        &self,
        booking_id: i32,
        status: BookingStatus,
    ) -> DatabaseResult<BookingRecord> {
        let active_model = bookings::ActiveModel {
            id: Set(booking_id),
            status: Set(status),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn delete(&self, booking_id: i32) -> DatabaseResult<()> {
        bookings::Entity::delete_by_id(booking_id)
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;
        Ok(())
    }
}
