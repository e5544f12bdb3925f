//! Repository for the `comments` table.

use sqlx::PgPool;

use conduit_core::types::DbId;

use crate::models::comment::{Comment, CommentView};

/// Column list shared across plain row queries.
const COLUMNS: &str = "id, body, article_id, author_id, created_at, updated_at";

/// Projection select list; `$1` is the (nullable) viewer account id.
const VIEW_COLUMNS: &str = "c.id, c.body, c.created_at, c.updated_at, \
    acc.username AS author_username, acc.bio AS author_bio, acc.image AS author_image, \
    EXISTS(SELECT 1 FROM account_follows fl WHERE fl.followed_id = c.author_id AND fl.follower_id = $1) AS following_author";

/// Provides CRUD operations for comments scoped to an article.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        article_id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (body, article_id, author_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(body)
            .bind(article_id)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by id, scoped to the given article. A comment that
    /// exists under a different article is not found.
    pub async fn find_by_id_and_article(
        pool: &PgPool,
        comment_id: DbId,
        article_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1 AND article_id = $2");
        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .bind(article_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the projection of a single comment for the given viewer.
    pub async fn find_view_by_id(
        pool: &PgPool,
        comment_id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<CommentView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM comments c
             JOIN accounts acc ON acc.id = c.author_id
             WHERE c.id = $2"
        );
        sqlx::query_as::<_, CommentView>(&query)
            .bind(viewer)
            .bind(comment_id)
            .fetch_optional(pool)
            .await
    }

    /// List comment projections for an article in insertion order.
    pub async fn list_views_by_article(
        pool: &PgPool,
        article_id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Vec<CommentView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM comments c
             JOIN accounts acc ON acc.id = c.author_id
             WHERE c.article_id = $2
             ORDER BY c.id"
        );
        sqlx::query_as::<_, CommentView>(&query)
            .bind(viewer)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment by id. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, comment_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
