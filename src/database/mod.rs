//! Database access layer with domain-specific DAOs
//!
//! Each domain (users, safaris, vehicles, bookings, feedback,
//! notifications) has its own DAO for focused operations.

use crate::config::Config;
use crate::health::HealthChecker;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};
use thiserror::Error;

pub mod dao;
pub mod entities;
pub mod migration;

pub use dao::{BookingsDao, FeedbackDao, NotificationsDao, SafarisDao, UsersDao, VehiclesDao};

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Record not found")]
    NotFound,
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("Migration error: {0}")]
    Migration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database manager trait for dependency injection and testing
#[async_trait]
pub trait DatabaseManager: Send + Sync {
    /// Run database migrations
    async fn migrate(&self) -> DatabaseResult<()>;

    /// Health check for database connection
    async fn health_check(&self) -> DatabaseResult<()>;

    /// Get users DAO
    fn users(&self) -> UsersDao;

    /// Get safari listings DAO
    fn safaris(&self) -> SafarisDao;

    /// Get vehicles DAO
    fn vehicles(&self) -> VehiclesDao;

    /// Get bookings DAO
    fn bookings(&self) -> BookingsDao;

    /// Get feedback DAO
    fn feedback(&self) -> FeedbackDao;

    /// Get notifications DAO
    fn notifications(&self) -> NotificationsDao;

    /// Get direct database connection (for migrations and admin operations)
    fn connection(&self) -> &DatabaseConnection;
}

/// Database connection manager implementation
pub struct DatabaseManagerImpl {
    pub connection: DatabaseConnection,
}

impl DatabaseManagerImpl {
    /// Create database manager from configuration
    pub async fn new_from_config(config: &Config) -> Result<Self, DatabaseError> {
        let mut options = ConnectOptions::new(&config.database.url);
        options.max_connections(config.database.max_connections);

        // An in-memory SQLite database exists per connection; a pool of
        // more than one would hand out empty databases.
        if config.database.url.contains(":memory:") {
            options.max_connections(1).min_connections(1);
        }

        let connection = sea_orm::Database::connect(options)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl DatabaseManager for DatabaseManagerImpl {
    async fn migrate(&self) -> DatabaseResult<()> {
        use crate::database::migration::Migrator;
        use sea_orm_migration::MigratorTrait;

        tracing::info!("Running database migrations");

        Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::Migration(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Successfully completed all migrations");
        Ok(())
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| DatabaseError::Database(format!("db error: {}", e)))
    }

    fn users(&self) -> UsersDao {
        UsersDao::new(self.connection.clone())
    }

    fn safaris(&self) -> SafarisDao {
        SafarisDao::new(self.connection.clone())
    }

    fn vehicles(&self) -> VehiclesDao {
        VehiclesDao::new(self.connection.clone())
    }

    fn bookings(&self) -> BookingsDao {
        BookingsDao::new(self.connection.clone())
    }

    fn feedback(&self) -> FeedbackDao {
        FeedbackDao::new(self.connection.clone())
    }

    fn notifications(&self) -> NotificationsDao {
        NotificationsDao::new(self.connection.clone())
    }

    fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

#[async_trait]
impl HealthChecker for DatabaseManagerImpl {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> crate::health::HealthCheckResult {
        match self.health_check().await {
            Ok(_) => crate::health::HealthCheckResult::healthy_with_details(serde_json::json!({
                "connection": "ok"
            })),
            Err(err) => crate::health::HealthCheckResult::unhealthy_with_details(
                "DB health check failed".to_string(),
                serde_json::json!({
                    "error": err.to_string()
                }),
            ),
        }
    }
}
