pub mod auth;
pub mod bookings;
pub mod feedback;
pub mod health;
pub mod notifications;
pub mod safaris;
pub mod users;
pub mod vehicles;

pub use auth::{create_auth_routes, create_profile_routes};
pub use bookings::create_booking_routes;
pub use feedback::create_feedback_routes;
pub use health::create_health_routes;
pub use notifications::{create_admin_notification_routes, create_notification_routes};
pub use safaris::create_safari_routes;
pub use users::create_admin_user_routes;
pub use vehicles::create_vehicle_routes;
