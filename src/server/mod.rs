use crate::{
    auth::{
        jwt::{JwtService, JwtServiceImpl, parse_algorithm},
        middleware::{admin_middleware, auth_middleware},
    },
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    notify::Notifier,
    routes::{
        create_admin_notification_routes, create_admin_user_routes, create_auth_routes,
        create_booking_routes, create_feedback_routes, create_health_routes,
        create_notification_routes, create_profile_routes, create_safari_routes,
        create_vehicle_routes,
    },
    shutdown::ShutdownCoordinator,
};
use axum::{Router, extract::DefaultBodyLimit, middleware};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Maximum request body size (1MB); every payload here is small JSON
const MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub jwt_service: Arc<dyn JwtService>,
    pub database: Arc<dyn DatabaseManager>,
    pub notifier: Notifier,
    pub health_service: Arc<HealthService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let jwt_algorithm = parse_algorithm(&config.jwt.algorithm)?;
        let jwt_service_impl =
            JwtServiceImpl::new(config.jwt.secret.clone(), jwt_algorithm)?;
        let jwt_checker = jwt_service_impl.health_checker();
        let jwt_service: Arc<dyn JwtService> = Arc::new(jwt_service_impl);

        let database_impl = Arc::new(
            DatabaseManagerImpl::new_from_config(&config)
                .await
                .map_err(AppError::Database)?,
        );
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        let notifier = Notifier::new(database.clone());
        let shutdown_coordinator = Arc::new(ShutdownCoordinator::new());

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;
        health_service.register(jwt_checker).await;

        Ok(Self {
            config: Arc::new(config),
            jwt_service,
            database,
            notifier,
            health_service,
            shutdown_coordinator,
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if self.config.database.migration_on_startup {
            info!("Running database migrations");
            self.database.migrate().await.map_err(AppError::Database)?;
            info!("Database migrations completed");
        }

        let app = self.create_app();

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        let mut shutdown_rx = self.shutdown_coordinator.subscribe();
        let serve_future = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            info!("Graceful shutdown initiated");
        });

        if let Err(e) = serve_future.await {
            error!("Server error: {}", e);
        }

        info!("Server shutdown complete");
        Ok(())
    }

    pub fn create_app(&self) -> Router {
        Router::new()
            .nest("/auth", create_auth_routes())
            .nest("/auth", self.protected_profile_routes())
            .nest("/health", create_health_routes())
            .nest("/api", self.user_api_routes())
            .nest("/api", self.admin_api_routes())
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
            .with_state(self.clone())
    }

    fn protected_profile_routes(&self) -> Router<Server> {
        create_profile_routes().layer(middleware::from_fn_with_state(
            self.clone(),
            auth_middleware,
        ))
    }

    /// All authenticated API surface. Per-route authorization (role
    /// checks, ownership guards) happens inside the handlers.
    fn user_api_routes(&self) -> Router<Server> {
        Router::new()
            .merge(create_safari_routes())
            .merge(create_vehicle_routes())
            .merge(create_booking_routes())
            .merge(create_feedback_routes())
            .merge(create_notification_routes())
            .layer(middleware::from_fn_with_state(
                self.clone(),
                auth_middleware,
            ))
    }

    fn admin_api_routes(&self) -> Router<Server> {
        Router::new()
            .merge(create_admin_user_routes())
            .merge(create_admin_notification_routes())
            .layer(middleware::from_fn(admin_middleware))
            .layer(middleware::from_fn_with_state(
                self.clone(),
                auth_middleware,
            ))
    }
}
