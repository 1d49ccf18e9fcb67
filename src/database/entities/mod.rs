pub mod bookings;
pub mod feedback;
pub mod notifications;
pub mod safaris;
pub mod users;
pub mod vehicles;

pub use bookings::Entity as Bookings;
pub use feedback::Entity as Feedback;
pub use notifications::Entity as Notifications;
pub use safaris::Entity as Safaris;
pub use users::Entity as Users;
pub use vehicles::Entity as Vehicles;

// Type aliases
pub type UserRecord = users::Model;
pub type SafariRecord = safaris::Model;
pub type VehicleRecord = vehicles::Model;
pub type BookingRecord = bookings::Model;
pub type FeedbackRecord = feedback::Model;
pub type NotificationRecord = notifications::Model;

pub use bookings::BookingStatus;
pub use notifications::NotificationEvent;
pub use safaris::ListingStatus;
pub use users::{Role, UserState};
