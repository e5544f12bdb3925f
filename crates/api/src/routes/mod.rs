//! Route table mapping each operation to its path.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{accounts, articles, comments, profiles, tags};
use crate::state::AppState;

pub mod health;

/// All routes nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Identity
        .route("/users", post(accounts::register))
        .route("/users/login", post(accounts::login))
        .route(
            "/user",
            get(accounts::current_user).put(accounts::update_user),
        )
        // Profiles and the follow graph. Static segments are matched before
        // the {username} capture.
        .route("/profiles/followers", get(profiles::list_followers))
        .route("/profiles/followings", get(profiles::list_followings))
        .route("/profiles/{username}", get(profiles::get_profile))
        .route(
            "/profiles/{username}/follow",
            post(profiles::follow).delete(profiles::unfollow),
        )
        // Articles, feed, favorites
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/articles/feed", get(articles::feed))
        .route(
            "/articles/{slug}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/articles/{slug}/favorite",
            post(articles::favorite_article).delete(articles::unfavorite_article),
        )
        // Comments
        .route(
            "/articles/{slug}/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/articles/{slug}/comments/{id}",
            delete(comments::delete_comment),
        )
        // Tags
        .route("/tags", get(tags::list_tags))
}
