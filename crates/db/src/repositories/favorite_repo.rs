//! Repository for the `article_favorites` association table.
//!
//! The composite primary key (article_id, account_id) makes both insert and
//! delete idempotent: `ON CONFLICT DO NOTHING` absorbs the duplicate insert,
//! and deleting an absent row is a no-op.

use sqlx::PgPool;

use conduit_core::types::DbId;

/// Provides membership operations for article favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Record that the account has favorited the article.
    ///
    /// Returns `true` if a relation row was inserted, `false` if it already
    /// existed.
    pub async fn insert(
        pool: &PgPool,
        article_id: DbId,
        account_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO article_favorites (article_id, account_id)
             VALUES ($1, $2)
             ON CONFLICT (article_id, account_id) DO NOTHING",
        )
        .bind(article_id)
        .bind(account_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove the favorite relation if present.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        article_id: DbId,
        account_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM article_favorites WHERE article_id = $1 AND account_id = $2",
        )
        .bind(article_id)
        .bind(account_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of accounts that have favorited the article.
    pub async fn count(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM article_favorites WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_one(pool)
        .await
    }

    /// Membership test; an absent account id (anonymous viewer) is never a
    /// favoriter.
    pub async fn is_favorited_by(
        pool: &PgPool,
        article_id: DbId,
        account_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let Some(account_id) = account_id else {
            return Ok(false);
        };
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM article_favorites
                WHERE article_id = $1 AND account_id = $2
            )",
        )
        .bind(article_id)
        .bind(account_id)
        .fetch_one(pool)
        .await
    }
}
