use crate::database::entities::{ListingStatus, VehicleRecord, vehicles};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Rental vehicles DAO for database operations
#[derive(Clone)]
pub struct VehiclesDao {
    db: DatabaseConnection,
}

impl VehiclesDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, vehicle: &VehicleRecord) -> DatabaseResult<VehicleRecord> {
        let active_model = vehicles::ActiveModel {
            id: ActiveValue::NotSet,
            owner_id: Set(vehicle.owner_id),
            make: Set(vehicle.make.clone()),
            model: Set(vehicle.model.clone()),
            category: Set(vehicle.category.clone()),
            seats: Set(vehicle.seats),
            daily_rate: Set(vehicle.daily_rate),
            status: Set(vehicle.status),
            created_at: Set(vehicle.created_at),
            updated_at: Set(vehicle.updated_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(&self, vehicle_id: i32) -> DatabaseResult<Option<VehicleRecord>> {
        vehicles::Entity::find_by_id(vehicle_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Public catalog: approved vehicles only, newest first
    pub async fn list_approved(&self) -> DatabaseResult<Vec<VehicleRecord>> {
        vehicles::Entity::find()
            .filter(vehicles::Column::Status.eq(ListingStatus::Approved))
            .order_by_desc(vehicles::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_by_owner(&self, owner_id: i32) -> DatabaseResult<Vec<VehicleRecord>> {
        vehicles::Entity::find()
            .filter(vehicles::Column::OwnerId.eq(owner_id))
            .order_by_desc(vehicles::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn list_all(&self) -> DatabaseResult<Vec<VehicleRecord>> {
        vehicles::Entity::find()
            .order_by_desc(vehicles::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Update fleet entry; re-submits the vehicle for review
    pub async fn update_content(
        &self,
        vehicle_id: i32,
        make: String,
        model: String,
        category: String,
        seats: i32,
        daily_rate: rust_decimal::Decimal,
    ) -> DatabaseResult<VehicleRecord> {
        let active_model = vehicles::ActiveModel {
            id: Set(vehicle_id),
            make: Set(make),
            model: Set(model),
            category: Set(category),
            seats: Set(seats),
            daily_rate: Set(daily_rate),
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
        vehicle_id: i32,
        status: ListingStatus,
    ) -> DatabaseResult<VehicleRecord> {
        let active_model = vehicles::ActiveModel {
            id: Set(vehicle_id),
            status: Set(status),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn delete(&self, vehicle_id: i32) -> DatabaseResult<()> {
        vehicles::Entity::delete_by_id(vehicle_id)
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;
        Ok(())
    }
}
