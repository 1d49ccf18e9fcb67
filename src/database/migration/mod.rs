use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250310_000001_create_users_table;
mod m20250310_000002_create_safaris_table;
mod m20250310_000003_create_vehicles_table;
mod m20250310_000004_create_bookings_table;
mod m20250310_000005_create_feedback_table;
mod m20250310_000006_create_notifications_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_users_table::Migration),
            Box::new(m20250310_000002_create_safaris_table::Migration),
            Box::new(m20250310_000003_create_vehicles_table::Migration),
            Box::new(m20250310_000004_create_bookings_table::Migration),
            Box::new(m20250310_000005_create_feedback_table::Migration),
            Box::new(m20250310_000006_create_notifications_table::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    Role,
    State,
    CreatedAt,
    UpdatedAt,
    LastLogin,
}

#[derive(Iden)]
pub enum Safaris {
    Table,
    Id,
    GuideId,
    Title,
    Description,
    Location,
    Price,
    DurationDays,
    Capacity,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    OwnerId,
    Make,
    Model,
    Category,
    Seats,
    DailyRate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    UserId,
    SafariId,
    VehicleId,
    StartDate,
    EndDate,
    PartySize,
    TotalPrice,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Feedback {
    Table,
    Id,
    UserId,
    GuideId,
    SafariId,
    Rating,
    Comment,
    Response,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Notifications {
    Table,
    Id,
    RecipientId,
    RecipientRole,
    EventType,
    Message,
    Details,
    Read,
    CreatedAt,
}
