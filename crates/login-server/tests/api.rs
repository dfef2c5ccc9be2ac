//! End-to-end tests driving the router with in-process requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use login_core::{Database, SqliteUserStore, TokenService, UserService};
use login_server::create_router;

async fn test_router() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("login.db")).await.unwrap();
    let tokens = Arc::new(TokenService::new(b"integration-test-secret-01234567"));
    let service = Arc::new(UserService::new(SqliteUserStore::new(&db), tokens));
    (create_router(service), dir)
}

fn sign_up_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/sign-up")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn login_request(token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/login")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn fernando() -> Value {
    json!({
        "name": "Fernando",
        "email": "fernando@test.com",
        "password": "Abc12345",
        "phones": [{"number": 1234567, "citycode": 1, "countrycode": "56"}]
    })
}

#[tokio::test]
async fn test_sign_up_created() {
    let (router, _dir) = test_router().await;

    let response = router.oneshot(sign_up_request(fernando())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Fernando");
    assert_eq!(body["email"], "fernando@test.com");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(body["is_active"].as_bool().unwrap());
    assert_eq!(body["phones"].as_array().unwrap().len(), 1);
    assert_eq!(body["phones"][0]["number"], 1234567);
    assert_eq!(body["phones"][0]["citycode"], 1);
    assert_eq!(body["phones"][0]["countrycode"], "56");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_sign_up_invalid_email() {
    let (router, _dir) = test_router().await;

    let mut payload = fernando();
    payload["email"] = json!("invalid-email");

    let response = router.oneshot(sign_up_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let detail = &body["error"][0];
    assert_eq!(detail["code"], 400);
    assert_eq!(detail["detail"], "invalid email format");
    assert!(!detail["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let (router, _dir) = test_router().await;

    let response = router
        .clone()
        .oneshot(sign_up_request(fernando()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router.oneshot(sign_up_request(fernando())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"][0]["detail"], "user already exists");
}

#[tokio::test]
async fn test_login_with_issued_token() {
    let (router, _dir) = test_router().await;

    let response = router
        .clone()
        .oneshot(sign_up_request(fernando()))
        .await
        .unwrap();
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = router.oneshot(login_request(&token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], "fernando@test.com");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["phones"][0]["number"], 1234567);
}

#[tokio::test]
async fn test_login_garbage_token() {
    let (router, _dir) = test_router().await;

    let response = router.oneshot(login_request("not-a-jwt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"][0]["detail"], "malformed token");
}

#[tokio::test]
async fn test_login_missing_authorization_header() {
    let (router, _dir) = test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/login")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_token_for_unknown_account() {
    let (router, _dir) = test_router().await;

    let foreign = TokenService::new(b"integration-test-secret-01234567");
    let token = foreign
        .issue("ghost@test.com", chrono::Utc::now())
        .unwrap();

    let response = router.oneshot(login_request(&token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"][0]["detail"], "user not found");
}
