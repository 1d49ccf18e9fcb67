use axum::http::StatusCode;
use safari_marketplace::database::entities::Role;
use serde_json::json;

mod common;
use common::TestHarness;

#[tokio::test]
async fn test_admin_routes_closed_to_other_roles() {
    let harness = TestHarness::new().await;
    let (_, user_token) = harness.user_with_token("user@example.com", Role::User).await;
    let (_, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;

    for token in [&user_token, &guide_token] {
        let (status, _) = harness.get("/api/admin/users", Some(token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let (status, _) = harness.get("/api/admin/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_lists_users_with_pagination() {
    let harness = TestHarness::new().await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;
    for i in 0..5 {
        harness
            .user_with_token(&format!("user{}@example.com", i), Role::User)
            .await;
    }

    let (status, body) = harness
        .get("/api/admin/users?limit=3&offset=0", Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    assert_eq!(body["count"], 3);
    assert_eq!(body["users"].as_array().unwrap().len(), 3);

    let (status, _) = harness
        .get("/api/admin/users?limit=1000", Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disabling_a_user_locks_them_out() {
    let harness = TestHarness::new().await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;
    let (user, user_token) = harness.user_with_token("target@example.com", Role::User).await;

    let (status, body) = harness
        .put(
            &format!("/api/admin/users/{}/state", user.id),
            Some(&admin_token),
            json!({ "state": "disabled" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "disabled");

    // The user's still-unexpired token is now useless
    let (status, _) = harness.get("/auth/me", Some(&user_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The change landed in their notification feed for when they return
    let (_, rows) = harness
        .get("/api/admin/notifications", Some(&admin_token))
        .await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows.as_array().unwrap()[0]["event_type"], "account_updated");
}

#[tokio::test]
async fn test_role_promotion_takes_effect_on_next_request() {
    let harness = TestHarness::new().await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;
    let (user, user_token) = harness.user_with_token("promotee@example.com", Role::User).await;

    // As a customer they cannot create listings
    let listing = json!({
        "title": "First trek",
        "description": "Fresh guide",
        "location": "Nakuru",
        "price": "90.00",
        "duration_days": 1,
        "capacity": 4
    });
    let (status, _) = harness
        .post("/api/safaris", Some(&user_token), listing.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = harness
        .put(
            &format!("/api/admin/users/{}/role", user.id),
            Some(&admin_token),
            json!({ "role": "guide" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "guide");

    // Same token, new privileges: the role is read from the database
    let (status, _) = harness.post("/api/safaris", Some(&user_token), listing).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_deletes_user() {
    let harness = TestHarness::new().await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;
    let (user, user_token) = harness.user_with_token("gone@example.com", Role::User).await;

    let (status, _) = harness
        .delete(&format!("/api/admin/users/{}", user.id), Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness
        .get(&format!("/api/admin/users/{}", user.id), Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = harness.get("/auth/me", Some(&user_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_actions_on_missing_user() {
    let harness = TestHarness::new().await;
    let (_, admin_token) = harness.user_with_token("admin@example.com", Role::Admin).await;

    let (status, _) = harness.get("/api/admin/users/99999", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = harness
        .put(
            "/api/admin/users/99999/state",
            Some(&admin_token),
            json!({ "state": "disabled" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = harness
        .delete("/api/admin/users/99999", Some(&admin_token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
