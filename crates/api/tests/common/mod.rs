//! Shared helpers for API integration tests.
//!
//! Each test gets its own database via `#[sqlx::test]`, builds the full
//! production router against it, and drives requests through
//! `tower::ServiceExt::oneshot` without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use conduit_api::auth::jwt::JwtConfig;
use conduit_api::config::ServerConfig;
use conduit_api::router::build_app_router;
use conduit_api::state::AppState;

/// Server configuration for tests, independent of the environment.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".into(),
            token_expiry_mins: 60,
        },
    }
}

/// Build the application router with the production middleware stack.
pub fn build_test_app(pool: sqlx::PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: &Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Deserialize a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register an account and return its token.
pub async fn register_user(app: &Router, username: &str, email: &str) -> String {
    let response = post_json(
        app,
        "/api/users",
        &json!({
            "user": {
                "username": username,
                "email": email,
                "password": "password123"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["user"]["token"].as_str().unwrap().to_string()
}

/// Create an article as the given user, returning its slug.
pub async fn create_article(app: &Router, token: &str, title: &str, tags: &[&str]) -> String {
    let response = post_json_auth(
        app,
        "/api/articles",
        token,
        &json!({
            "article": {
                "title": title,
                "description": format!("About {title}"),
                "body": format!("Body of {title}"),
                "tagList": tags
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["article"]["slug"].as_str().unwrap().to_string()
}
