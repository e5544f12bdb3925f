//! Handlers for the article lifecycle, filtered listing, feed, and the
//! favorite ledger.
//!
//! Slug policy: derived from the title by space-to-hyphen substitution; an
//! exact collision is rejected (422) rather than disambiguated, both on
//! create and on a title-changing update. Ownership checks compare account
//! ids. Viewer-relative flags in every returned projection belong to the
//! calling viewer, never to accounts named in filter terms.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use conduit_core::error::CoreError;
use conduit_core::slug::slug_from_title;
use conduit_core::types::DbId;
use conduit_db::models::article::{Article, ArticleFilter, CreateArticle, UpdateArticle};
use conduit_db::repositories::{AccountRepo, ArticleRepo, FavoriteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::query::{ArticleListParams, PaginationParams};
use crate::response::{ArticleBody, ArticlesBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateArticleBody {
    pub article: CreateArticleRequest,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub body: String,
    #[serde(default)]
    pub tag_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleBody {
    pub article: UpdateArticleRequest,
}

/// Partial update: only supplied fields overwrite. Tags are immutable after
/// creation and deliberately absent here.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

/// GET /api/articles
///
/// Filtered listing: each provided term (tag, author, favorited-by username)
/// is ANDed; results are newest first with limit/offset pagination.
pub async fn list_articles(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> AppResult<Json<ArticlesBody>> {
    // Resolve the favorited-by username before querying; an unknown
    // username is a 404, not an empty page.
    let favorited_by = match &params.favorited {
        Some(username) => Some(
            AccountRepo::find_by_username(&state.pool, username)
                .await?
                .ok_or_else(|| CoreError::not_found("Account", username))?
                .id,
        ),
        None => None,
    };

    let filter = ArticleFilter {
        tag: params.tag,
        author: params.author,
        favorited_by,
        limit: params.limit,
        offset: params.offset,
    };

    let views = ArticleRepo::list_by_filter(&state.pool, &filter, viewer.account_id()).await?;
    let articles: Vec<_> = views.into_iter().map(Into::into).collect();

    Ok(Json(ArticlesBody {
        articles_count: articles.len(),
        articles,
    }))
}

/// GET /api/articles/feed
///
/// Articles authored by accounts the caller follows, newest first. A feed is
/// meaningless anonymously, so this requires authentication and resolving a
/// missing account is a 404.
pub async fn feed(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ArticlesBody>> {
    let account = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", user.account_id.to_string()))?;

    let views =
        ArticleRepo::list_by_feed(&state.pool, account.id, params.limit, params.offset).await?;
    let articles: Vec<_> = views.into_iter().map(Into::into).collect();

    Ok(Json(ArticlesBody {
        articles_count: articles.len(),
        articles,
    }))
}

/// GET /api/articles/{slug}
pub async fn get_article(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ArticleBody>> {
    article_body(&state, &slug, viewer.account_id()).await.map(Json)
}

/// POST /api/articles
///
/// Create an article with its tags in one transaction. A colliding slug is
/// rejected before anything is persisted.
pub async fn create_article(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateArticleBody>,
) -> AppResult<(StatusCode, Json<ArticleBody>)> {
    let input = body.article;
    input.validate()?;

    let slug = slug_from_title(&input.title);
    if ArticleRepo::slug_exists(&state.pool, &slug, None).await? {
        return Err(AppError::Core(CoreError::BadRequest(format!(
            "Article with slug {slug} already exists"
        ))));
    }

    let author = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", user.account_id.to_string()))?;

    let article = ArticleRepo::create(
        &state.pool,
        &CreateArticle {
            slug,
            title: input.title,
            description: input.description,
            body: input.body,
            author_id: author.id,
        },
        &input.tag_list,
    )
    .await?;

    tracing::info!(slug = %article.slug, author_id = author.id, "Article created");

    let body = article_body(&state, &article.slug, Some(author.id)).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /api/articles/{slug}
///
/// Author-only partial update. A title change recomputes the slug in place,
/// renaming the article's durable identifier: the old slug 404s afterward.
pub async fn update_article(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<UpdateArticleBody>,
) -> AppResult<Json<ArticleBody>> {
    let input = body.article;
    let article = find_owned_article(&state, &slug, user.account_id).await?;

    let new_slug = match &input.title {
        Some(title) => {
            let new_slug = slug_from_title(title);
            // The recomputed slug must be unique across all other articles.
            if ArticleRepo::slug_exists(&state.pool, &new_slug, Some(article.id)).await? {
                return Err(AppError::Core(CoreError::BadRequest(format!(
                    "Article with slug {new_slug} already exists"
                ))));
            }
            Some(new_slug)
        }
        None => None,
    };

    let updated = ArticleRepo::update(
        &state.pool,
        article.id,
        &UpdateArticle {
            slug: new_slug,
            title: input.title,
            description: input.description,
            body: input.body,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Article", &slug))?;

    tracing::info!(slug = %updated.slug, account_id = user.account_id, "Article updated");

    article_body(&state, &updated.slug, Some(user.account_id)).await.map(Json)
}

/// DELETE /api/articles/{slug}
///
/// Author-only. Tags, favorites, and comments cascade with the article.
pub async fn delete_article(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let article = find_owned_article(&state, &slug, user.account_id).await?;

    ArticleRepo::delete(&state.pool, article.id).await?;
    tracing::info!(slug = %slug, account_id = user.account_id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/articles/{slug}/favorite
///
/// Idempotent: favoriting twice leaves one relation row; the response always
/// carries the up-to-date count and `favorited=true`.
pub async fn favorite_article(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ArticleBody>> {
    let article = find_article(&state, &slug).await?;
    let account = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", user.account_id.to_string()))?;

    let inserted = FavoriteRepo::insert(&state.pool, article.id, account.id).await?;
    if inserted {
        tracing::info!(slug = %slug, account_id = account.id, "Article favorited");
    }

    article_body(&state, &slug, Some(account.id)).await.map(Json)
}

/// DELETE /api/articles/{slug}/favorite
///
/// Idempotent: unfavoriting an article that is not favorited is a no-op.
pub async fn unfavorite_article(
    user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ArticleBody>> {
    let article = find_article(&state, &slug).await?;
    let account = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", user.account_id.to_string()))?;

    let deleted = FavoriteRepo::delete(&state.pool, article.id, account.id).await?;
    if deleted {
        tracing::info!(slug = %slug, account_id = account.id, "Article unfavorited");
    }

    article_body(&state, &slug, Some(account.id)).await.map(Json)
}

async fn find_article(state: &AppState, slug: &str) -> AppResult<Article> {
    Ok(ArticleRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Article", slug))?)
}

/// Resolve an article and require the caller to be its author.
async fn find_owned_article(
    state: &AppState,
    slug: &str,
    caller_id: DbId,
) -> AppResult<Article> {
    let article = find_article(state, slug).await?;
    if article.author_id != caller_id {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Article with slug {slug} is not owned by the caller"
        ))));
    }
    Ok(article)
}

/// Fetch the `{article}` envelope for the given viewer.
async fn article_body(
    state: &AppState,
    slug: &str,
    viewer: Option<DbId>,
) -> AppResult<ArticleBody> {
    let view = ArticleRepo::find_view_by_slug(&state.pool, slug, viewer)
        .await?
        .ok_or_else(|| CoreError::not_found("Article", slug))?;
    Ok(ArticleBody {
        article: view.into(),
    })
}
