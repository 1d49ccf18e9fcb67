use crate::error::AppError;
use crate::health::{HealthCheckResult, HealthChecker};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub fn parse_algorithm(alg: &str) -> Result<Algorithm, AppError> {
    Algorithm::from_str(alg)
        .map_err(|_| AppError::BadRequest(format!("Unsupported JWT algorithm: {}", alg)))
}

fn create_decoding_key(key_data: &str, algorithm: Algorithm) -> Result<DecodingKey, AppError> {
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            Ok(DecodingKey::from_secret(key_data.as_ref()))
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(key_data.as_bytes())
            .map_err(|_| AppError::Unauthorized("Invalid RSA key format".to_string())),
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(key_data.as_bytes())
            .map_err(|_| AppError::Unauthorized("Invalid EC key format".to_string())),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(key_data.as_bytes())
            .map_err(|_| AppError::Unauthorized("Invalid EdDSA key format".to_string())),
    }
}

fn create_encoding_key(key_data: &str, algorithm: Algorithm) -> Result<EncodingKey, AppError> {
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            Ok(EncodingKey::from_secret(key_data.as_ref()))
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => EncodingKey::from_rsa_pem(key_data.as_bytes())
            .map_err(|_| AppError::Unauthorized("Invalid RSA key format".to_string())),
        Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(key_data.as_bytes())
            .map_err(|_| AppError::Unauthorized("Invalid EC key format".to_string())),
        Algorithm::EdDSA => EncodingKey::from_ed_pem(key_data.as_bytes())
            .map_err(|_| AppError::Unauthorized("Invalid EdDSA key format".to_string())),
    }
}

/// Claims carried by an access token.
///
/// Deliberately minimal: only the subject id and validity window. The
/// subject's role is never read from the token - the auth middleware
/// re-fetches the user record on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: i32,
    pub iat: usize,
    pub exp: usize,
}

impl AuthClaims {
    pub fn new(user_id: i32, expires_in_seconds: u64) -> Self {
        let now = Utc::now().timestamp() as usize;
        Self {
            sub: user_id,
            iat: now,
            exp: now + expires_in_seconds as usize,
        }
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        self.exp <= now
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp as i64, 0).unwrap_or_else(Utc::now)
    }
}

/// JWT service trait for dependency injection and testing
pub trait JwtService: Send + Sync {
    /// Sign claims into a token string
    fn create_token(&self, claims: &AuthClaims) -> Result<String, AppError>;

    /// Validate a token's signature and expiry, returning its claims
    fn validate_token(&self, token: &str) -> Result<AuthClaims, AppError>;

    /// Get algorithm used by this service
    fn algorithm(&self) -> Algorithm;
}

#[derive(Clone)]
pub struct JwtServiceImpl {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtServiceImpl {
    pub fn new(secret: String, algorithm: Algorithm) -> Result<Self, AppError> {
        let encoding_key = create_encoding_key(&secret, algorithm)?;
        let decoding_key = create_decoding_key(&secret, algorithm)?;

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
        })
    }

    /// Create a health checker for this JWT service
    pub fn health_checker(&self) -> Arc<JwtHealthChecker> {
        Arc::new(JwtHealthChecker {
            service: self.clone(),
        })
    }
}

impl JwtService for JwtServiceImpl {
    fn create_token(&self, claims: &AuthClaims) -> Result<String, AppError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn validate_token(&self, token: &str) -> Result<AuthClaims, AppError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<AuthClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(token_data.claims)
    }

    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// Health checker implementation for the JWT service
pub struct JwtHealthChecker {
    service: JwtServiceImpl,
}

#[async_trait]
impl HealthChecker for JwtHealthChecker {
    fn name(&self) -> &str {
        "jwt"
    }

    async fn check(&self) -> HealthCheckResult {
        // Sign and validate a short-lived token to exercise both keys
        let test_claims = AuthClaims::new(1, 60);

        let token = match self.service.create_token(&test_claims) {
            Ok(token) => token,
            Err(err) => {
                return HealthCheckResult::unhealthy_with_details(
                    "Failed to create test JWT token".to_string(),
                    serde_json::json!({
                        "algorithm": format!("{:?}", self.service.algorithm),
                        "error": err.to_string(),
                    }),
                );
            }
        };

        match self.service.validate_token(&token) {
            Ok(claims) if claims.sub == test_claims.sub => {
                HealthCheckResult::healthy_with_details(serde_json::json!({
                    "algorithm": format!("{:?}", self.service.algorithm),
                }))
            }
            Ok(_) => HealthCheckResult::unhealthy(
                "Token validation returned incorrect claims".to_string(),
            ),
            Err(err) => HealthCheckResult::unhealthy_with_details(
                "Failed to validate test JWT token".to_string(),
                serde_json::json!({
                    "algorithm": format!("{:?}", self.service.algorithm),
                    "error": err.to_string(),
                }),
            ),
        }
    }
}
