use axum::http::StatusCode;
use safari_marketplace::database::entities::{Role, UserState};
use serde_json::json;

mod common;
use common::TestHarness;

#[tokio::test]
async fn test_register_and_login_flow() {
    let harness = TestHarness::new().await;

    let (status, body) = harness
        .post(
            "/auth/register",
            None,
            json!({
                "email": "jane@example.com",
                "password": "a-long-password",
                "display_name": "Jane",
                "role": "guide"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "jane@example.com");
    assert_eq!(body["user"]["role"], "guide");
    assert!(body["token"].is_string());
    // The password hash never leaves the server
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = harness
        .post(
            "/auth/login",
            None,
            json!({ "email": "jane@example.com", "password": "a-long-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = harness.get("/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "jane@example.com");
    assert!(body["last_login"].is_string());
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_input() {
    let harness = TestHarness::new().await;

    let payload = json!({ "email": "dup@example.com", "password": "a-long-password" });
    let (status, _) = harness.post("/auth/register", None, payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness.post("/auth/register", None, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = harness
        .post(
            "/auth/register",
            None,
            json!({ "email": "short@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = harness
        .post(
            "/auth/register",
            None,
            json!({ "email": "not-an-email", "password": "a-long-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_role_cannot_be_self_registered() {
    let harness = TestHarness::new().await;

    let (status, _) = harness
        .post(
            "/auth/register",
            None,
            json!({
                "email": "sneaky@example.com",
                "password": "a-long-password",
                "role": "admin"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let harness = TestHarness::new().await;
    let (user, _) = harness.user_with_token("real@example.com", Role::User).await;

    // Wrong password for a real account
    let (wrong_pw_status, wrong_pw_body) = harness
        .post(
            "/auth/login",
            None,
            json!({ "email": "real@example.com", "password": "wrong-password" }),
        )
        .await;

    // Account that does not exist at all
    let (no_user_status, no_user_body) = harness
        .post(
            "/auth/login",
            None,
            json!({ "email": "ghost@example.com", "password": "wrong-password" }),
        )
        .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, no_user_body);

    // Disabled account looks the same too
    harness
        .server
        .database
        .users()
        .update_state(user.id, UserState::Disabled)
        .await
        .unwrap();
    let (disabled_status, disabled_body) = harness
        .post(
            "/auth/login",
            None,
            json!({ "email": "real@example.com", "password": safari_marketplace::test_utils::TEST_PASSWORD }),
        )
        .await;
    assert_eq!(disabled_status, StatusCode::UNAUTHORIZED);
    assert_eq!(disabled_body, no_user_body);
}

#[tokio::test]
async fn test_profile_update_and_password_change() {
    let harness = TestHarness::new().await;
    let (_, token) = harness
        .user_with_token("renameme@example.com", Role::User)
        .await;

    let (status, body) = harness
        .put(
            "/auth/me",
            Some(&token),
            json!({ "display_name": "New Name", "password": "another-long-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "New Name");

    // Old password no longer works, new one does
    let (status, _) = harness
        .post(
            "/auth/login",
            None,
            json!({ "email": "renameme@example.com", "password": safari_marketplace::test_utils::TEST_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = harness
        .post(
            "/auth/login",
            None,
            json!({ "email": "renameme@example.com", "password": "another-long-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Empty update is rejected
    let (status, _) = harness.put("/auth/me", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleted_account_token_stops_working() {
    let harness = TestHarness::new().await;
    let (_, token) = harness
        .user_with_token("leaving@example.com", Role::User)
        .await;

    let (status, _) = harness.delete("/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    // The still-unexpired token no longer resolves to a principal
    let (status, _) = harness.get("/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let harness = TestHarness::new().await;
    let (user, token) = harness
        .user_with_token("victim@example.com", Role::User)
        .await;

    // Token signed with a different secret for the same subject
    let foreign = {
        use jsonwebtoken::{EncodingKey, Header, encode};
        let claims = safari_marketplace::auth::jwt::AuthClaims::new(user.id, 3600);
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("wrong-secret".as_ref()),
        )
        .unwrap()
    };

    let (status, _) = harness.get("/auth/me", Some(&foreign)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The legitimate token still works
    let (status, _) = harness.get("/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}
