//! Backend client tests against a stub REST server.
//!
//! Covers:
//! - bearer token on every authenticated call
//! - accept-then-start ordering and the post-type redirect
//! - 401 mapping and server error messages
//! - bare-array and envelope list responses

mod common;

use std::time::Duration;

use campus_gigs::api::{ApiClient, ApiError};
use campus_gigs::models::application::{self, ApplicationStatus, PostType};
use campus_gigs::models::{review, transaction, user};
use common::*;
use serde_json::json;

fn pending_app(id: i64, post_type: &str) -> serde_json::Value {
    json!({
        "applicationId": id,
        "postType": post_type,
        "serviceOwnerId": TEST_USER_ID,
        "freelancerId": 9,
        "status": "Pending",
        "serviceTitle": "Logo design",
        "servicePrice": "500",
        "applicantName": "Ben"
    })
}

#[actix_rt::test]
async fn test_accept_then_start_on_client_post() {
    let backend = FakeBackend::start(vec![
        stub("PATCH", "/api/service-confirmations/12/accept", 200, json!({"message": "ok"})),
        stub("PATCH", "/api/my-applications/12/start", 200, json!({})),
    ])
    .await;
    let api = backend.client();

    let outcome = application::accept_and_start(&api, TEST_TOKEN, 12, PostType::Client)
        .await
        .expect("accept should succeed");

    assert_eq!(outcome.redirect, "/project-status");
    assert!(outcome.start_error.is_none());
    assert_eq!(
        backend.calls(),
        vec!["PATCH /api/service-confirmations/12/accept", "PATCH /api/my-applications/12/start"]
    );
    for r in backend.requests() {
        assert_eq!(r.authorization.as_deref(), Some("Bearer test-token-123"));
    }
    backend.stop().await;
}

#[actix_rt::test]
async fn test_accept_on_freelancer_post_lands_on_active() {
    let backend = FakeBackend::start(vec![
        stub("PATCH", "/api/service-confirmations/3/accept", 200, json!({})),
        stub("PATCH", "/api/my-applications/3/start", 200, json!({})),
    ])
    .await;

    let outcome = application::accept_and_start(&backend.client(), TEST_TOKEN, 3, PostType::Freelancer)
        .await
        .unwrap();
    assert_eq!(outcome.redirect, "/active");
    backend.stop().await;
}

#[actix_rt::test]
async fn test_failed_start_keeps_accept_and_returns_to_list() {
    let backend = FakeBackend::start(vec![
        stub("PATCH", "/api/service-confirmations/12/accept", 200, json!({})),
        stub("PATCH", "/api/my-applications/12/start", 500, json!({"error": "Could not start project"})),
    ])
    .await;

    let outcome = application::accept_and_start(&backend.client(), TEST_TOKEN, 12, PostType::Client)
        .await
        .unwrap();
    assert_eq!(outcome.redirect, "/confirmations");
    let err = outcome.start_error.expect("start error should be reported");
    assert_eq!(err.user_message(), "Could not start project");
    assert_eq!(backend.calls().len(), 2);
    backend.stop().await;
}

#[actix_rt::test]
async fn test_failed_accept_skips_start() {
    let backend = FakeBackend::start(vec![stub(
        "PATCH",
        "/api/service-confirmations/12/accept",
        409,
        json!({"message": "Application already handled"}),
    )])
    .await;

    let err = application::accept_and_start(&backend.client(), TEST_TOKEN, 12, PostType::Client)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 409, .. }));
    assert_eq!(err.user_message(), "Application already handled");
    assert_eq!(backend.calls(), vec!["PATCH /api/service-confirmations/12/accept"]);
    backend.stop().await;
}

#[actix_rt::test]
async fn test_unauthorized_maps_to_dedicated_error() {
    let backend = FakeBackend::start(vec![stub("GET", "/api/status", 401, json!({"message": "jwt expired"}))]).await;

    let err = application::find_for_status(&backend.client(), TEST_TOKEN).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
    backend.stop().await;
}

#[actix_rt::test]
async fn test_bare_array_and_envelope_lists_agree() {
    let backend = FakeBackend::start(vec![
        stub("GET", "/api/service-confirmations", 200, json!([pending_app(1, "client"), pending_app(2, "freelancer")])),
        stub(
            "GET",
            "/api/my-applications",
            200,
            json!({"data": [pending_app(1, "client"), pending_app(2, "freelancer"), {"status": "no id"}]}),
        ),
    ])
    .await;
    let api = backend.client();

    let bare = application::find_received(&api, TEST_TOKEN).await.unwrap();
    let wrapped = application::find_mine(&api, TEST_TOKEN).await.unwrap();
    assert_eq!(bare, wrapped, "malformed item is skipped, the rest map identically");
    assert_eq!(bare[1].post_type, PostType::Freelancer);
    assert_eq!(bare[0].status, ApplicationStatus::Pending);
    assert_eq!(bare[0].service_price, 500.0);
    backend.stop().await;
}

#[actix_rt::test]
async fn test_find_by_id_falls_back_to_own_applications() {
    let backend = FakeBackend::start(vec![
        stub("GET", "/api/status", 200, json!({"projects": []})),
        stub("GET", "/api/my-applications", 200, json!([pending_app(44, "client")])),
    ])
    .await;
    let api = backend.client();

    let found = application::find_by_id(&api, TEST_TOKEN, 44).await.unwrap();
    assert_eq!(found.map(|a| a.id), Some(44));
    let missing = application::find_by_id(&api, TEST_TOKEN, 45).await.unwrap();
    assert!(missing.is_none());
    backend.stop().await;
}

#[actix_rt::test]
async fn test_mutation_bodies() {
    let backend = FakeBackend::start(vec![
        stub("PATCH", "/api/my-applications/8/proof", 200, json!({})),
        stub("POST", "/api/transactions", 201, json!({"id": 1})),
        stub("POST", "/api/reviews", 201, json!({})),
        stub("PUT", "/api/users/3/suspend", 200, json!({})),
    ])
    .await;
    let api = backend.client();

    application::submit_proof(&api, TEST_TOKEN, 8, "/9j/AAAA").await.unwrap();
    transaction::record_payment(&api, TEST_TOKEN, 8, "1234567890123", 750.0).await.unwrap();
    review::submit(&api, TEST_TOKEN, 8, 5, "  Great work ").await.unwrap();
    user::set_suspended(&api, TEST_TOKEN, 3, true).await.unwrap();

    let bodies: Vec<_> = backend.requests().iter().map(|r| r.json()).collect();
    assert_eq!(bodies[0], json!({"proofImage": "/9j/AAAA"}));
    assert_eq!(bodies[1], json!({"applicationId": 8, "referenceNumber": "1234567890123", "amount": 750.0}));
    assert_eq!(bodies[2], json!({"applicationId": 8, "rating": 5, "comment": "Great work"}));
    assert_eq!(bodies[3], json!({"suspend": true}));
    backend.stop().await;
}

#[actix_rt::test]
async fn test_login_without_token_is_decode_error() {
    let backend = FakeBackend::start(vec![stub("POST", "/api/auth/login", 200, json!({"user": {"id": 1}}))]).await;

    let err = user::authenticate(&backend.client(), TEST_EMAIL, TEST_PASSWORD).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    let login_call = &backend.requests()[0];
    assert!(login_call.authorization.is_none());
    assert_eq!(login_call.json(), json!({"email": TEST_EMAIL, "password": TEST_PASSWORD}));
    backend.stop().await;
}

#[actix_rt::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 9 locally
    let api = ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
    let err = user::find_all(&api, TEST_TOKEN).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.user_message().starts_with("Unable to reach the server"));
}
