mod common;

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

use common::test_router;

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

fn register_body(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "ValidPassword123",
    })
}

#[tokio::test]
async fn register_returns_session() {
    let router = test_router();

    let (status, body) = send(
        &router,
        post("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["userId"], 1);
    let token = body["token"].as_str().expect("Missing token");
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn register_duplicate_username_conflicts() {
    let router = test_router();

    let (status, _) = send(
        &router,
        post("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &router,
        post("/api/auth/register", register_body("alice", "other@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "This username is already taken. Please choose a different one."
    );
    assert_eq!(body["errorType"], 2);
}

#[tokio::test]
async fn register_validation_failure_is_bad_request() {
    let router = test_router();

    let (status, body) = send(
        &router,
        post("/api/auth/register", register_body("ab", "ab@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username must be at least 3 characters long.");
    assert_eq!(body["errorType"], 1);
}

#[tokio::test]
async fn login_round_trip_and_enumeration_safety() {
    let router = test_router();

    let (status, _) = send(
        &router,
        post("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &router,
        post(
            "/api/auth/login",
            json!({ "username": "alice", "password": "ValidPassword123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(body["token"].is_string());

    let (wrong_status, wrong_body) = send(
        &router,
        post(
            "/api/auth/login",
            json!({ "username": "alice", "password": "WrongPassword123" }),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &router,
        post(
            "/api/auth/login",
            json!({ "username": "nobody", "password": "ValidPassword123" }),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // Unknown user and wrong password must be indistinguishable.
    assert_eq!(wrong_body["message"], unknown_body["message"]);
    assert_eq!(wrong_body["errorType"], 3);
    assert_eq!(unknown_body["errorType"], 3);
}

#[tokio::test]
async fn protected_route_requires_valid_token() {
    let router = test_router();

    let (status, body) = send(
        &router,
        post("/api/auth/register", register_body("alice", "alice@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        Request::builder()
            .uri("/api/auth/me")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], 1);
    assert_eq!(body["username"], "alice");

    let (status, body) = send(
        &router,
        Request::builder()
            .uri("/api/auth/me")
            .header("authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorType"], 3);

    let (status, _) = send(
        &router,
        Request::builder()
            .uri("/api/auth/me")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
