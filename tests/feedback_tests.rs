use axum::http::StatusCode;
use safari_marketplace::database::entities::Role;
use serde_json::json;

mod common;
use common::TestHarness;

/// Seed a guide, an approved safari, and a review by `author_token`.
/// Returns the feedback id.
async fn seed_feedback(harness: &TestHarness, guide_id: i32, author_token: &str) -> i64 {
    let safari_id = harness.seed_approved_safari(guide_id).await;
    let (status, body) = harness
        .post(
            "/api/feedback",
            Some(author_token),
            json!({ "safari_id": safari_id, "rating": 4, "comment": "Great trip" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_feedback_routed_to_listing_guide() {
    let harness = TestHarness::new().await;
    let (guide, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;
    let (author, author_token) = harness.user_with_token("author@example.com", Role::User).await;

    let feedback_id = seed_feedback(&harness, guide.id, &author_token).await;

    // The assignment came from the listing, not the request
    let (status, body) = harness
        .get(&format!("/api/feedback/{}", feedback_id), Some(&guide_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guide_id"].as_i64().unwrap(), guide.id as i64);
    assert_eq!(body["user_id"].as_i64().unwrap(), author.id as i64);

    // It shows up in the guide's received list
    let (_, body) = harness.get("/api/feedback", Some(&guide_token)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_assignee_responds_author_edits() {
    let harness = TestHarness::new().await;
    let (guide, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;
    let (_, author_token) = harness.user_with_token("author@example.com", Role::User).await;
    let feedback_id = seed_feedback(&harness, guide.id, &author_token).await;

    // The guide responds
    let (status, body) = harness
        .put(
            &format!("/api/feedback/{}/response", feedback_id),
            Some(&guide_token),
            json!({ "response": "Thanks, come again!" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Thanks, come again!");

    // The guide cannot edit the review body
    let (status, _) = harness
        .put(
            &format!("/api/feedback/{}", feedback_id),
            Some(&guide_token),
            json!({ "rating": 5, "comment": "Improved by the guide" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The author cannot respond
    let (status, _) = harness
        .put(
            &format!("/api/feedback/{}/response", feedback_id),
            Some(&author_token),
            json!({ "response": "Replying to myself" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // But the author edits their own review
    let (status, body) = harness
        .put(
            &format!("/api/feedback/{}", feedback_id),
            Some(&author_token),
            json!({ "rating": 5, "comment": "Even better in hindsight" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 5);
}

#[tokio::test]
async fn test_unrelated_guide_denied() {
    let harness = TestHarness::new().await;
    let (g1, _) = harness.user_with_token("g1@example.com", Role::Guide).await;
    let (_, g2_token) = harness.user_with_token("g2@example.com", Role::Guide).await;
    let (_, author_token) = harness.user_with_token("author@example.com", Role::User).await;
    let feedback_id = seed_feedback(&harness, g1.id, &author_token).await;

    // A guide not assigned to this feedback cannot read or respond
    let (status, _) = harness
        .get(&format!("/api/feedback/{}", feedback_id), Some(&g2_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = harness
        .put(
            &format!("/api/feedback/{}/response", feedback_id),
            Some(&g2_token),
            json!({ "response": "Not my customer" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_author_deletes_own_review() {
    let harness = TestHarness::new().await;
    let (guide, guide_token) = harness.user_with_token("guide@example.com", Role::Guide).await;
    let (_, author_token) = harness.user_with_token("author@example.com", Role::User).await;
    let feedback_id = seed_feedback(&harness, guide.id, &author_token).await;

    // The assigned guide cannot delete the review
    let (status, _) = harness
        .delete(&format!("/api/feedback/{}", feedback_id), Some(&guide_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = harness
        .delete(&format!("/api/feedback/{}", feedback_id), Some(&author_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness
        .get(&format!("/api/feedback/{}", feedback_id), Some(&author_token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rating_validation_and_missing_safari() {
    let harness = TestHarness::new().await;
    let (_, user_token) = harness.user_with_token("author@example.com", Role::User).await;

    let (status, _) = harness
        .post(
            "/api/feedback",
            Some(&user_token),
            json!({ "safari_id": 99999, "rating": 3, "comment": "Ghost safari" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let harness2 = TestHarness::new().await;
    let (guide, _) = harness2.user_with_token("guide@example.com", Role::Guide).await;
    let (_, token) = harness2.user_with_token("author@example.com", Role::User).await;
    let safari_id = harness2.seed_approved_safari(guide.id).await;

    for rating in [0, 6] {
        let (status, _) = harness2
            .post(
                "/api/feedback",
                Some(&token),
                json!({ "safari_id": safari_id, "rating": rating, "comment": "Out of range" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
