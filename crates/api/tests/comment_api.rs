//! Integration tests for comments.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    body_json, build_test_app, create_article, delete_auth, get, post_json_auth, register_user,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn add_comment_returns_created_view(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let alice_token = register_user(&app, "alice", "alice@example.com").await;
    let bob_token = register_user(&app, "bob", "bob@example.com").await;
    let slug = create_article(&app, &alice_token, "discussion", &[]).await;

    let response = post_json_auth(
        &app,
        &format!("/api/articles/{slug}/comments"),
        &bob_token,
        &json!({ "comment": { "body": "great read" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["comment"]["body"], "great read");
    assert_eq!(body["comment"]["author"]["username"], "bob");
    assert!(body["comment"]["id"].as_i64().is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comment_on_unknown_article_is_not_found(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let token = register_user(&app, "alice", "alice@example.com").await;

    let response = post_json_auth(
        &app,
        "/api/articles/no-such-article/comments",
        &token,
        &json!({ "comment": { "body": "into the void" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn comments_list_in_insertion_order(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let token = register_user(&app, "alice", "alice@example.com").await;
    let slug = create_article(&app, &token, "discussion", &[]).await;

    for text in ["first", "second", "third"] {
        post_json_auth(
            &app,
            &format!("/api/articles/{slug}/comments"),
            &token,
            &json!({ "comment": { "body": text } }),
        )
        .await;
    }

    // Anonymous read works; comments come back oldest first.
    let response = get(&app, &format!("/api/articles/{slug}/comments")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[0]["body"], "first");
    assert_eq!(comments[2]["body"], "third");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_comment_author_may_delete(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let alice_token = register_user(&app, "alice", "alice@example.com").await;
    let bob_token = register_user(&app, "bob", "bob@example.com").await;
    let slug = create_article(&app, &alice_token, "discussion", &[]).await;

    let response = post_json_auth(
        &app,
        &format!("/api/articles/{slug}/comments"),
        &bob_token,
        &json!({ "comment": { "body": "bobs comment" } }),
    )
    .await;
    let body = body_json(response).await;
    let comment_id = body["comment"]["id"].as_i64().unwrap();

    // The article's author is not the comment's author.
    let response = delete_auth(
        &app,
        &format!("/api/articles/{slug}/comments/{comment_id}"),
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        &app,
        &format!("/api/articles/{slug}/comments/{comment_id}"),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("/api/articles/{slug}/comments")).await;
    let body = body_json(response).await;
    assert_eq!(body["comments"].as_array().map(Vec::len), Some(0));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_through_wrong_slug_is_not_found(pool: sqlx::PgPool) {
    let app = build_test_app(pool);
    let token = register_user(&app, "alice", "alice@example.com").await;
    let slug = create_article(&app, &token, "right article", &[]).await;
    let other_slug = create_article(&app, &token, "wrong article", &[]).await;

    let response = post_json_auth(
        &app,
        &format!("/api/articles/{slug}/comments"),
        &token,
        &json!({ "comment": { "body": "scoped" } }),
    )
    .await;
    let body = body_json(response).await;
    let comment_id = body["comment"]["id"].as_i64().unwrap();

    // The id exists, but not under that slug.
    let response = delete_auth(
        &app,
        &format!("/api/articles/{other_slug}/comments/{comment_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The comment survives.
    let response = get(&app, &format!("/api/articles/{slug}/comments")).await;
    let body = body_json(response).await;
    assert_eq!(body["comments"].as_array().map(Vec::len), Some(1));
}
