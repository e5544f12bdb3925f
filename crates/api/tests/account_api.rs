//! Integration tests for registration, login, and the current account.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    body_json, build_test_app, get, get_auth, post_json, put_json_auth, register_user,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_user_with_token(pool: sqlx::PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/users",
        &json!({
            "user": {
                "username": "alice",
                "email": "alice@example.com",
                "password": "password123"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["user"]["bio"].is_null());
    assert!(body["user"].get("password").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_duplicate_email(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice", "alice@example.com").await;

    let response = post_json(
        &app,
        "/api/users",
        &json!({
            "user": {
                "username": "someone-else",
                "email": "alice@example.com",
                "password": "password123"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert!(body["errors"]["body"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_duplicate_username(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice", "alice@example.com").await;

    let response = post_json(
        &app,
        "/api/users",
        &json!({
            "user": {
                "username": "alice",
                "email": "other@example.com",
                "password": "password123"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: sqlx::PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/users",
        &json!({
            "user": {
                "username": "alice",
                "email": "alice@example.com",
                "password": "short"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice", "alice@example.com").await;

    let response = post_json(
        &app,
        "/api/users/login",
        &json!({
            "user": { "email": "alice@example.com", "password": "password123" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"]["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice", "alice@example.com").await;

    let response = post_json(
        &app,
        "/api/users/login",
        &json!({
            "user": { "email": "alice@example.com", "password": "wrong-password" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_unknown_email_is_not_found(pool: sqlx::PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/users/login",
        &json!({
            "user": { "email": "nobody@example.com", "password": "password123" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn current_user_requires_token(pool: sqlx::PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/user").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn current_user_round_trips(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let token = register_user(&app, "alice", "alice@example.com").await;

    let response = get_auth(&app, "/api/user", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_user_overwrites_only_supplied_fields(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let token = register_user(&app, "alice", "alice@example.com").await;

    let response = put_json_auth(
        &app,
        "/api/user",
        &token,
        &json!({
            "user": { "bio": "Rustacean", "image": "https://example.com/a.png" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["bio"], "Rustacean");
    assert_eq!(body["user"]["image"], "https://example.com/a.png");
    // Untouched fields keep their values.
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_user_rejects_taken_email(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    register_user(&app, "alice", "alice@example.com").await;
    let bob_token = register_user(&app, "bob", "bob@example.com").await;

    let response = put_json_auth(
        &app,
        "/api/user",
        &bob_token,
        &json!({ "user": { "email": "alice@example.com" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_user_allows_resubmitting_own_email(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let token = register_user(&app, "alice", "alice@example.com").await;

    let response = put_json_auth(
        &app,
        "/api/user",
        &token,
        &json!({ "user": { "email": "alice@example.com", "bio": "still me" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn updated_password_works_for_login(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let token = register_user(&app, "alice", "alice@example.com").await;

    let response = put_json_auth(
        &app,
        "/api/user",
        &token,
        &json!({ "user": { "password": "new-password-456" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app,
        "/api/users/login",
        &json!({
            "user": { "email": "alice@example.com", "password": "new-password-456" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old password no longer authenticates.
    let response = post_json(
        &app,
        "/api/users/login",
        &json!({
            "user": { "email": "alice@example.com", "password": "password123" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
