#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use safari_marketplace::{
    Server,
    database::entities::{Role, UserRecord},
    test_utils::{TestServerBuilder, create_test_token, seed_user},
};
use tower::ServiceExt;

/// Unified test harness that handles app setup and token management
pub struct TestHarness {
    pub server: Server,
    pub app: Router,
}

impl TestHarness {
    pub async fn new() -> Self {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();
        Self { server, app }
    }

    /// Seed a user and return it together with a valid token
    pub async fn user_with_token(&self, email: &str, role: Role) -> (UserRecord, String) {
        let user = seed_user(&self.server, email, role).await;
        let token = create_test_token(&self.server, user.id);
        (user, token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Create an approved safari owned by `guide_id`, bypassing HTTP
    pub async fn seed_approved_safari(&self, guide_id: i32) -> i32 {
        use chrono::Utc;
        use rust_decimal::Decimal;
        use safari_marketplace::database::entities::{ListingStatus, SafariRecord};

        let now = Utc::now();
        let safari = SafariRecord {
            id: 0,
            guide_id,
            title: "Masai Mara classic".to_string(),
            description: "Five days in the Mara".to_string(),
            location: "Masai Mara".to_string(),
            price: Decimal::new(15000, 2), // 150.00
            duration_days: 5,
            capacity: 8,
            status: ListingStatus::Approved,
            created_at: now,
            updated_at: now,
        };
        self.server
            .database
            .safaris()
            .create(&safari)
            .await
            .unwrap()
            .id
    }

    /// Create an approved vehicle owned by `owner_id`, bypassing HTTP
    pub async fn seed_approved_vehicle(&self, owner_id: i32) -> i32 {
        use chrono::Utc;
        use rust_decimal::Decimal;
        use safari_marketplace::database::entities::{ListingStatus, VehicleRecord};

        let now = Utc::now();
        let vehicle = VehicleRecord {
            id: 0,
            owner_id,
            make: "Toyota".to_string(),
            model: "Land Cruiser".to_string(),
            category: "4x4".to_string(),
            seats: 6,
            daily_rate: Decimal::new(8000, 2), // 80.00
            status: ListingStatus::Approved,
            created_at: now,
            updated_at: now,
        };
        self.server
            .database
            .vehicles()
            .create(&vehicle)
            .await
            .unwrap()
            .id
    }
}
