pub mod access;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod principal;

pub use access::{Action, Relation, ResourceType, authorize, authorize_ownership, permitted};
pub use principal::{Principal, Role};
