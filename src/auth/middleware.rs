use crate::auth::principal::{Principal, Role};
use crate::error::AppError;
use crate::server::Server;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{trace, warn};

/// Principal-resolving middleware: validates the bearer credential and
/// attaches a fresh [`Principal`] to the request extensions.
///
/// The user record is re-fetched on every request rather than trusted
/// from the token, so deletions, disabling, and role changes take effect
/// immediately. Every failure mode here surfaces as `Unauthorized` - the
/// response never distinguishes "no such user" from "bad signature".
pub async fn auth_middleware(
    State(server): State<Server>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid Authorization format".to_string())
    })?;

    let claims = server.jwt_service.validate_token(token)?;

    let user = server
        .database
        .users()
        .find_by_id(claims.sub)
        .await
        .map_err(|e| AppError::Internal(format!("Database error: {}", e)))?
        .ok_or_else(|| {
            warn!(user_id = %claims.sub, "Token subject no longer exists");
            AppError::Unauthorized("User not found".to_string())
        })?;

    if !user.state.is_active() {
        warn!(user_id = %user.id, "Disabled account attempted authentication");
        return Err(AppError::Unauthorized("Account is disabled".to_string()));
    }

    trace!(user_id = %user.id, role = %user.role.as_str(), "Request authenticated");

    let principal = Principal {
        id: user.id,
        role: user.role,
        email: user.email,
    };
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Admin middleware for the admin route group. Expects a principal
/// resolved by [`auth_middleware`] earlier in the stack.
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .ok_or_else(|| AppError::Unauthorized("Missing user authentication".to_string()))?;

    if principal.role != Role::Admin {
        warn!(user_id = %principal.id, role = %principal.role.as_str(), "Admin access denied");
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    trace!(user_id = %principal.id, "Admin access granted");

    Ok(next.run(request).await)
}
