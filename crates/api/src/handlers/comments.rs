//! Handlers for comments, scoped to an article by slug.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use conduit_core::error::CoreError;
use conduit_core::types::DbId;
use conduit_db::models::article::Article;
use conduit_db::repositories::{AccountRepo, ArticleRepo, CommentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::{CommentBody, CommentsBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCommentBody {
    pub comment: CreateCommentRequest,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub body: String,
}

/// POST /api/articles/{slug}/comments
pub async fn add_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CreateCommentBody>,
) -> AppResult<(StatusCode, Json<CommentBody>)> {
    let input = body.comment;
    input.validate()?;

    let article = find_article(&state, &slug).await?;
    let author = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", user.account_id.to_string()))?;

    let comment = CommentRepo::create(&state.pool, article.id, author.id, &input.body).await?;

    tracing::info!(slug = %slug, comment_id = comment.id, author_id = author.id, "Comment added");

    let view = CommentRepo::find_view_by_id(&state.pool, comment.id, Some(author.id))
        .await?
        .ok_or_else(|| CoreError::Internal("Created comment vanished".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(CommentBody {
            comment: view.into(),
        }),
    ))
}

/// GET /api/articles/{slug}/comments
///
/// All comments for the article in insertion order.
pub async fn list_comments(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CommentsBody>> {
    let article = find_article(&state, &slug).await?;

    let views =
        CommentRepo::list_views_by_article(&state.pool, article.id, viewer.account_id()).await?;

    Ok(Json(CommentsBody {
        comments: views.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /api/articles/{slug}/comments/{id}
///
/// Author-only; the comment id is scoped to the slug, so deleting an
/// existing comment through the wrong article's slug is a 404.
pub async fn delete_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path((slug, comment_id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let article = find_article(&state, &slug).await?;

    let comment = CommentRepo::find_by_id_and_article(&state.pool, comment_id, article.id)
        .await?
        .ok_or_else(|| {
            CoreError::not_found("Comment", format!("{comment_id} on article {slug}"))
        })?;

    if comment.author_id != user.account_id {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Comment with id {comment_id} is not owned by the caller"
        ))));
    }

    CommentRepo::delete(&state.pool, comment.id).await?;
    tracing::info!(slug = %slug, comment_id, account_id = user.account_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_article(state: &AppState, slug: &str) -> AppResult<Article> {
    Ok(ArticleRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Article", slug))?)
}
