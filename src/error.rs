use crate::database::DatabaseError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(config::ConfigError),
    Jwt(jsonwebtoken::errors::Error),
    Database(DatabaseError),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "Configuration error: {}", err),
            AppError::Jwt(err) => write!(f, "JWT error: {}", err),
            AppError::Database(err) => write!(f, "Database error: {}", err),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Jwt(err)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound => AppError::NotFound("Record not found".to_string()),
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            AppError::Jwt(_) => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Authentication failed"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "Access denied"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let message = match &self {
            // Server-side failure detail stays out of the response body.
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                error_message.to_string()
            }
            // Credential failures collapse to one generic message so the
            // response cannot be used to enumerate accounts.
            AppError::Jwt(_) | AppError::Unauthorized(_) => error_message.to_string(),
            // Forbidden/NotFound/BadRequest carry enough for the caller to
            // self-diagnose, never another principal's data.
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

    #[test]
    fn test_app_error_display() {
        let config_err = AppError::Config(config::ConfigError::NotFound("test".to_string()));
        assert!(config_err.to_string().contains("Configuration error"));

        let jwt_err = AppError::Jwt(JwtError::from(ErrorKind::InvalidToken));
        assert!(jwt_err.to_string().contains("JWT error"));

        let forbidden_err = AppError::Forbidden("role 'user' may not approve listings".to_string());
        assert_eq!(
            forbidden_err.to_string(),
            "Forbidden: role 'user' may not approve listings"
        );

        let not_found_err = AppError::NotFound("safari not found".to_string());
        assert_eq!(not_found_err.to_string(), "Not found: safari not found");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Unauthorized("missing header".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Forbidden("not the owner".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::NotFound("booking not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::BadRequest("rating out of range".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_jwt_error_maps_to_unauthorized() {
        let err = AppError::Jwt(JwtError::from(ErrorKind::ExpiredSignature));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_database_not_found_converts_to_app_not_found() {
        let err: AppError = DatabaseError::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_unauthorized_body_is_generic() {
        let err = AppError::Unauthorized("user 42 does not exist".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
