use crate::{
    auth::{
        jwt::AuthClaims,
        password::{hash_password, verify_password},
        principal::{Principal, Role},
    },
    database::entities::UserRecord,
    error::AppError,
    routes::users::UserResponse,
    server::Server,
};
use axum::{
    Json as AxumJson, Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    /// Defaults to a customer account. Admin accounts are never created
    /// through this endpoint.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub password: Option<String>,
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if !email.contains('@') || email.len() < 3 {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

fn issue_token(server: &Server, user_id: i32) -> Result<(String, DateTime<Utc>), AppError> {
    let claims = AuthClaims::new(user_id, server.config.jwt.expiry_seconds);
    let token = server.jwt_service.create_token(&claims)?;
    Ok((token, claims.expires_at()))
}

pub async fn register(
    State(server): State<Server>,
    AxumJson(request): AxumJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    validate_credentials(&request.email, &request.password)?;

    let role = request.role.unwrap_or(Role::User);
    if role == Role::Admin {
        return Err(AppError::Forbidden(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }

    if server
        .database
        .users()
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Email is already registered".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let mut user = UserRecord::new(request.email.trim().to_lowercase(), password_hash, role);
    if let Some(name) = request.display_name {
        user = user.with_display_name(name);
    }

    let user = server.database.users().create(&user).await?;
    info!(user_id = %user.id, role = %user.role.as_str(), "User registered");

    let (token, expires_at) = issue_token(&server, user.id)?;
    Ok(Json(TokenResponse {
        token,
        expires_at,
        user: UserResponse::from(user),
    }))
}

pub async fn login(
    State(server): State<Server>,
    AxumJson(request): AxumJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    // One failure path for unknown email, wrong password, and disabled
    // account, so the endpoint cannot be used to probe for accounts.
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = server
        .database
        .users()
        .find_by_email(request.email.trim().to_lowercase().as_str())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&user.password_hash, &request.password) {
        return Err(invalid());
    }
    if !user.state.is_active() {
        return Err(invalid());
    }

    let user = server.database.users().update_last_login(user.id).await?;
    info!(user_id = %user.id, "User logged in");

    let (token, expires_at) = issue_token(&server, user.id)?;
    Ok(Json(TokenResponse {
        token,
        expires_at,
        user: UserResponse::from(user),
    }))
}

pub async fn get_profile(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<UserResponse>, AppError> {
    let user = server
        .database
        .users()
        .find_by_id(principal.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn update_profile(
    State(server): State<Server>,
    principal: Principal,
    AxumJson(request): AxumJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if request.display_name.is_none() && request.password.is_none() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }

    let password_hash = match request.password {
        Some(password) => {
            if password.len() < 8 {
                return Err(AppError::BadRequest(
                    "Password must be at least 8 characters".to_string(),
                ));
            }
            Some(hash_password(&password)?)
        }
        None => None,
    };

    let user = server
        .database
        .users()
        .update_profile(principal.id, request.display_name, password_hash)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_profile(
    State(server): State<Server>,
    principal: Principal,
) -> Result<Json<serde_json::Value>, AppError> {
    server.database.users().delete(principal.id).await?;
    info!(user_id = %principal.id, "User deleted own account");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Unauthenticated routes: registration and login
pub fn create_auth_routes() -> Router<Server> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Profile routes for the authenticated principal
pub fn create_profile_routes() -> Router<Server> {
    Router::new().route(
        "/me",
        get(get_profile).put(update_profile).delete(delete_profile),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("a@b.example", "longenough").is_ok());
        assert!(validate_credentials("not-an-email", "longenough").is_err());
        assert!(validate_credentials("a@b.example", "short").is_err());
    }
}
