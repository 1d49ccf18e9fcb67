use crate::{
    auth::jwt::AuthClaims,
    config::Config,
    database::entities::{Role, UserRecord},
    server::Server,
};

/// Test server builder backed by in-memory SQLite
pub struct TestServerBuilder {
    config: Config,
    jwt_secret: Option<String>,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            jwt_secret: Some("test-secret".to_string()),
        }
    }

    /// Set a custom JWT secret for testing
    pub fn with_jwt_secret(mut self, secret: String) -> Self {
        self.jwt_secret = Some(secret);
        self
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the test server with migrations applied
    pub async fn build(self) -> Server {
        let mut config = self.config;
        config.database.url = "sqlite::memory:".to_string();

        if let Some(secret) = &self.jwt_secret {
            config.jwt.secret = secret.clone();
            config.jwt.algorithm = "HS256".to_string();
        }

        let server = Server::new(config).await.unwrap();
        server.database.migrate().await.unwrap();
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Default password every seeded test user can log in with
pub const TEST_PASSWORD: &str = "password123";

/// Create a user with the given role, hashed default password, active
pub async fn seed_user(server: &Server, email: &str, role: Role) -> UserRecord {
    let password_hash = crate::auth::password::hash_password(TEST_PASSWORD).unwrap();
    let user = UserRecord::new(email, password_hash, role).with_display_name("Test User");
    server.database.users().create(&user).await.unwrap()
}

/// Create a valid access token for the given user id
pub fn create_test_token(server: &Server, user_id: i32) -> String {
    let claims = AuthClaims::new(user_id, 3600);
    server.jwt_service.create_token(&claims).unwrap()
}

/// Create a well-signed token whose validity window is in the past
pub fn create_expired_token(server: &Server, user_id: i32) -> String {
    let mut claims = AuthClaims::new(user_id, 3600);
    claims.iat -= 7200;
    claims.exp -= 7200;
    server.jwt_service.create_token(&claims).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_builder_defaults() {
        let server = TestServerBuilder::new().build().await;

        assert_eq!(server.config.database.url, "sqlite::memory:");
        assert_eq!(server.config.jwt.secret, "test-secret");
    }

    #[tokio::test]
    async fn test_seed_user_and_token_round_trip() {
        let server = TestServerBuilder::new().build().await;
        let user = seed_user(&server, "seeded@example.com", Role::Guide).await;
        assert!(user.id > 0);
        assert_eq!(user.role, Role::Guide);

        let token = create_test_token(&server, user.id);
        let claims = server.jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[tokio::test]
    async fn test_expired_token_fails_validation() {
        let server = TestServerBuilder::new().build().await;
        let token = create_expired_token(&server, 1);
        assert!(server.jwt_service.validate_token(&token).is_err());
    }
}
