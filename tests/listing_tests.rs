use axum::http::StatusCode;
use safari_marketplace::database::entities::Role;
use serde_json::json;

mod common;
use common::TestHarness;

fn safari_payload(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Three days tracking the big five",
        "location": "Serengeti",
        "price": "220.00",
        "duration_days": 3,
        "capacity": 6
    })
}

#[tokio::test]
async fn test_listing_lifecycle_pending_to_approved() {
    let harness = TestHarness::new().await;
    let (_, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;
    let (_, user_token) = harness.user_with_token("user@example.com", Role::User).await;

    let (status, body) = harness
        .post("/api/safaris", Some(&guide_token), safari_payload("Serengeti trek"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
    let safari_id = body["id"].as_i64().unwrap();

    // Pending listings stay out of the public catalog
    let (status, body) = harness.get("/api/safaris", Some(&user_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    // ...and a customer fetching the draft directly is denied
    let (status, _) = harness
        .get(&format!("/api/safaris/{}", safari_id), Some(&user_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owning guide sees their own draft
    let (status, _) = harness
        .get(&format!("/api/safaris/{}", safari_id), Some(&guide_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Admin approves; the listing enters the catalog
    let (status, body) = harness
        .put(
            &format!("/api/safaris/{}/status", safari_id),
            Some(&admin_token),
            json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (status, body) = harness.get("/api/safaris", Some(&user_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_catalog_includes_pending_listings() {
    let harness = TestHarness::new().await;
    let (_, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;
    let (owner, _) = harness
        .user_with_token("fleet@example.com", Role::VehicleOwner)
        .await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;
    let (_, user_token) = harness.user_with_token("user@example.com", Role::User).await;

    let (status, body) = harness
        .post("/api/safaris", Some(&guide_token), safari_payload("Pending trek"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let safari_id = body["id"].as_i64().unwrap();

    // Customers see an empty catalog; the reviewing admin sees the draft
    let (status, body) = harness.get("/api/safaris", Some(&user_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (status, body) = harness.get("/api/safaris", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["id"].as_i64().unwrap(), safari_id);
    assert_eq!(listings[0]["status"], "pending");

    // The vehicle catalog behaves the same way
    harness.seed_approved_vehicle(owner.id).await;
    let (_, fleet_token) = harness
        .user_with_token("fleet2@example.com", Role::VehicleOwner)
        .await;
    let (status, body) = harness
        .post(
            "/api/vehicles",
            Some(&fleet_token),
            json!({
                "make": "Toyota",
                "model": "Hiace",
                "category": "minibus",
                "seats": 12,
                "daily_rate": "65.00"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");

    let (status, body) = harness.get("/api/vehicles", Some(&user_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = harness.get("/api/vehicles", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_only_admin_decides_reviews() {
    let harness = TestHarness::new().await;
    let (guide, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;
    let safari_id = harness.seed_approved_safari(guide.id).await;

    // Even the owning guide cannot approve their own listing
    let (status, _) = harness
        .put(
            &format!("/api/safaris/{}/status", safari_id),
            Some(&guide_token),
            json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_foreign_guide_cannot_touch_listing() {
    let harness = TestHarness::new().await;
    let (owner, _) = harness.user_with_token("owner@example.com", Role::Guide).await;
    let (_, other_token) = harness.user_with_token("other@example.com", Role::Guide).await;
    let safari_id = harness.seed_approved_safari(owner.id).await;

    // Existing but foreign: 403, not 404
    let (status, _) = harness
        .put(
            &format!("/api/safaris/{}", safari_id),
            Some(&other_token),
            safari_payload("Hijacked"),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = harness
        .delete(&format!("/api/safaris/{}", safari_id), Some(&other_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Absent resource: 404, decided before ownership
    let (status, _) = harness
        .put(
            "/api/safaris/99999",
            Some(&other_token),
            safari_payload("Ghost"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_bypasses_ownership() {
    let harness = TestHarness::new().await;
    let (owner, _) = harness.user_with_token("owner@example.com", Role::Guide).await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;
    let safari_id = harness.seed_approved_safari(owner.id).await;

    let (status, _) = harness
        .delete(&format!("/api/safaris/{}", safari_id), Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness
        .get(&format!("/api/safaris/{}", safari_id), Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customers_cannot_create_listings() {
    let harness = TestHarness::new().await;
    let (_, user_token) = harness.user_with_token("user@example.com", Role::User).await;

    let (status, _) = harness
        .post("/api/safaris", Some(&user_token), safari_payload("Freelance"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = harness
        .post(
            "/api/vehicles",
            Some(&user_token),
            json!({
                "make": "Toyota",
                "model": "Hiace",
                "category": "minibus",
                "seats": 12,
                "daily_rate": "65.00"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_editing_approved_listing_resets_review() {
    let harness = TestHarness::new().await;
    let (guide, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;
    let safari_id = harness.seed_approved_safari(guide.id).await;

    let (status, body) = harness
        .put(
            &format!("/api/safaris/{}", safari_id),
            Some(&guide_token),
            safari_payload("Updated itinerary"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["title"], "Updated itinerary");
}

#[tokio::test]
async fn test_vehicle_ownership_mirrors_safaris() {
    let harness = TestHarness::new().await;
    let (owner, owner_token) = harness
        .user_with_token("fleet@example.com", Role::VehicleOwner)
        .await;
    let (_, other_token) = harness
        .user_with_token("rival@example.com", Role::VehicleOwner)
        .await;
    let vehicle_id = harness.seed_approved_vehicle(owner.id).await;

    let update = json!({
        "make": "Toyota",
        "model": "Land Cruiser",
        "category": "4x4",
        "seats": 7,
        "daily_rate": "95.00"
    });

    let (status, _) = harness
        .put(&format!("/api/vehicles/{}", vehicle_id), Some(&other_token), update.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = harness
        .put(&format!("/api/vehicles/{}", vehicle_id), Some(&owner_token), update)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seats"], 7);
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn test_listing_validation() {
    let harness = TestHarness::new().await;
    let (_, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;

    let mut bad = safari_payload("Bad price");
    bad["price"] = json!("0.00");
    let (status, _) = harness.post("/api/safaris", Some(&guide_token), bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad = safari_payload("Bad capacity");
    bad["capacity"] = json!(0);
    let (status, _) = harness.post("/api/safaris", Some(&guide_token), bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
