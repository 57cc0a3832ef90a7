#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use stories_api::app::{router, AppState};
use stories_api::auth::PasswordHasher;
use stories_api::config::{AppConfig, AuthMode};
use stories_api::models::NewUser;
use stories_api::store;

pub const TEST_SECRET: &str = "test-secret-key";

pub fn test_config(auth: AuthMode) -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiry_days: 7,
        auth,
    }
}

/// Build a fresh in-memory app for one test. The state is returned too so
/// tests can inspect or seed the stores directly.
pub async fn setup_app(auth: AuthMode) -> (Router, AppState) {
    let config = test_config(auth);
    let pool = store::connect(&config.database_url).await.expect("connect test database");
    let state = AppState::new(pool, &config);
    (router(state.clone()), state)
}

/// Register a user straight through the store and return a valid token.
pub async fn seed_user_token(state: &AppState, username: &str, password: &str) -> String {
    let password_hash = state.hasher.hash(password).expect("hash password");
    let user = state
        .users
        .insert(NewUser {
            username: username.to_string(),
            password_hash,
            first_name: "Example".to_string(),
            last_name: "User".to_string(),
        })
        .await
        .expect("seed user");
    state
        .tokens
        .issue(&user.username, &user.first_name, &user.last_name)
        .expect("issue token")
        .token
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.expect("infallible service")
}

pub fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

pub fn delete(path: &str) -> Request<Body> {
    Request::delete(path).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Request with an arbitrary, possibly malformed body. Pass `None` to leave
/// the content type header off entirely.
pub fn raw_request(method: &str, path: &str, body: &str, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(value) = content_type {
        builder = builder.header(header::CONTENT_TYPE, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
    request
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

pub async fn assert_not_found(response: Response) {
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "message": "Not found" }));
}
