use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;

pub use crate::database::entities::users::Role;

/// The authenticated actor behind a request.
///
/// Built fresh by the auth middleware on every request from the persisted
/// user record - the role is re-read from storage rather than trusted from
/// the token, so a role downgrade takes effect immediately. Never stored
/// across requests; handlers receive it as an explicit value, not ambient
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: i32,
    pub role: Role,
    pub email: String,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Missing user authentication".to_string()))
    }
}
