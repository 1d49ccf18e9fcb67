pub mod bookings;
pub mod feedback;
pub mod notifications;
pub mod safaris;
pub mod users;
pub mod vehicles;

pub use bookings::BookingsDao;
pub use feedback::FeedbackDao;
pub use notifications::NotificationsDao;
pub use safaris::SafarisDao;
pub use users::UsersDao;
pub use vehicles::VehiclesDao;
