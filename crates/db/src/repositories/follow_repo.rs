//! Repository for the `account_follows` association table.
//!
//! Rows are directed edges: (followed_id, follower_id) means the follower
//! receives the followed account's articles in their feed. The composite
//! primary key keeps the relation idempotent.

use sqlx::PgPool;

use conduit_core::types::DbId;

use crate::models::account::Account;

/// Account columns selected when listing the accounts on either end of a
/// follow edge.
const ACCOUNT_COLUMNS: &str = "ac.id, ac.username, ac.email, ac.password_hash, ac.bio, ac.image, \
    ac.created_at, ac.updated_at";

/// Provides follow-edge operations between accounts.
pub struct FollowRepo;

impl FollowRepo {
    /// Insert a follow edge stamped with the current time.
    ///
    /// Returns `true` if the edge was inserted, `false` if it already existed.
    pub async fn insert(
        pool: &PgPool,
        followed_id: DbId,
        follower_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO account_follows (followed_id, follower_id)
             VALUES ($1, $2)
             ON CONFLICT (followed_id, follower_id) DO NOTHING",
        )
        .bind(followed_id)
        .bind(follower_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a follow edge if present.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        followed_id: DbId,
        follower_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM account_follows WHERE followed_id = $1 AND follower_id = $2",
        )
        .bind(followed_id)
        .bind(follower_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Membership test; an absent viewer (anonymous) never follows anyone.
    pub async fn is_following(
        pool: &PgPool,
        followed_id: DbId,
        follower_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let Some(follower_id) = follower_id else {
            return Ok(false);
        };
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM account_follows
                WHERE followed_id = $1 AND follower_id = $2
            )",
        )
        .bind(followed_id)
        .bind(follower_id)
        .fetch_one(pool)
        .await
    }

    /// Accounts following the given account.
    pub async fn list_followers(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<Account>, sqlx::Error> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS}
             FROM account_follows fl
             JOIN accounts ac ON ac.id = fl.follower_id
             WHERE fl.followed_id = $1
             ORDER BY fl.created_at"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// Accounts the given account follows.
    pub async fn list_followings(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<Account>, sqlx::Error> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS}
             FROM account_follows fl
             JOIN accounts ac ON ac.id = fl.followed_id
             WHERE fl.follower_id = $1
             ORDER BY fl.created_at"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }
}
