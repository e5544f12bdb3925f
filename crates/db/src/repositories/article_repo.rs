//! Repository for the `articles` table and its read projections.
//!
//! Projection queries take the viewer as a nullable `$1` bind: the
//! `favorited` and `following_author` flags are correlated subqueries
//! against that parameter, so an anonymous viewer (NULL) yields `false`
//! for both without a separate query shape.

use sqlx::PgPool;

use conduit_core::pagination::{clamp_limit, clamp_offset};
use conduit_core::types::DbId;

use crate::models::article::{Article, ArticleFilter, ArticleView, CreateArticle, UpdateArticle};

/// Column list shared across plain row queries.
const COLUMNS: &str = "id, slug, title, description, body, author_id, created_at, updated_at";

/// Projection select list. `a` is the articles row, `acc` its author;
/// `$1` is the (nullable) viewer account id.
const VIEW_COLUMNS: &str = "a.id, a.slug, a.title, a.description, a.body, \
    ARRAY(SELECT t.tag_name FROM article_tags t WHERE t.article_id = a.id ORDER BY t.id) AS tag_list, \
    a.created_at, a.updated_at, \
    EXISTS(SELECT 1 FROM article_favorites f WHERE f.article_id = a.id AND f.account_id = $1) AS favorited, \
    (SELECT COUNT(*) FROM article_favorites f WHERE f.article_id = a.id) AS favorites_count, \
    acc.username AS author_username, acc.bio AS author_bio, acc.image AS author_image, \
    EXISTS(SELECT 1 FROM account_follows fl WHERE fl.followed_id = a.author_id AND fl.follower_id = $1) AS following_author";

/// Provides CRUD and listing operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article together with its tag rows in one transaction.
    ///
    /// Tags are attached only here; article updates never touch them.
    pub async fn create(
        pool: &PgPool,
        input: &CreateArticle,
        tag_names: &[String],
    ) -> Result<Article, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO articles (slug, title, description, body, author_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.body)
            .bind(input.author_id)
            .fetch_one(&mut *tx)
            .await?;

        for tag_name in tag_names {
            sqlx::query("INSERT INTO article_tags (article_id, tag_name) VALUES ($1, $2)")
                .bind(article.id)
                .bind(tag_name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(article)
    }

    /// Find an article row by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE slug = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a slug is already taken, optionally excluding one
    /// article (used when a title change recomputes the slug in place).
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM articles
                WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Update an article. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                body = COALESCE($5, body),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article by id. Tags, favorites, and comments cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the read projection of a single article for the given viewer.
    pub async fn find_view_by_slug(
        pool: &PgPool,
        slug: &str,
        viewer: Option<DbId>,
    ) -> Result<Option<ArticleView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM articles a
             JOIN accounts acc ON acc.id = a.author_id
             WHERE a.slug = $2"
        );
        sqlx::query_as::<_, ArticleView>(&query)
            .bind(viewer)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List article projections matching the filter, newest first.
    ///
    /// Each provided filter term contributes one parameterized predicate;
    /// absent terms contribute nothing, and all present terms are ANDed.
    pub async fn list_by_filter(
        pool: &PgPool,
        filter: &ArticleFilter,
        viewer: Option<DbId>,
    ) -> Result<Vec<ArticleView>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1; // $1 is the viewer

        if filter.tag.is_some() {
            param_idx += 1;
            conditions.push(format!(
                "EXISTS(SELECT 1 FROM article_tags t \
                 WHERE t.article_id = a.id AND t.tag_name = ${param_idx})"
            ));
        }
        if filter.author.is_some() {
            param_idx += 1;
            conditions.push(format!("acc.username = ${param_idx}"));
        }
        if filter.favorited_by.is_some() {
            param_idx += 1;
            conditions.push(format!(
                "EXISTS(SELECT 1 FROM article_favorites f \
                 WHERE f.article_id = a.id AND f.account_id = ${param_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = clamp_limit(filter.limit);
        let offset = clamp_offset(filter.offset);

        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM articles a
             JOIN accounts acc ON acc.id = a.author_id
             {where_clause}
             ORDER BY a.created_at DESC
             LIMIT ${} OFFSET ${}",
            param_idx + 1,
            param_idx + 2,
        );

        let mut q = sqlx::query_as::<_, ArticleView>(&query).bind(viewer);
        if let Some(tag) = &filter.tag {
            q = q.bind(tag);
        }
        if let Some(author) = &filter.author {
            q = q.bind(author);
        }
        if let Some(favorited_by) = filter.favorited_by {
            q = q.bind(favorited_by);
        }

        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// List article projections authored by accounts the given follower
    /// follows, newest first. The follower is also the viewer for the
    /// projection's relative flags.
    pub async fn list_by_feed(
        pool: &PgPool,
        follower_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ArticleView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM articles a
             JOIN accounts acc ON acc.id = a.author_id
             WHERE EXISTS(
                 SELECT 1 FROM account_follows fl
                 WHERE fl.followed_id = a.author_id AND fl.follower_id = $1
             )
             ORDER BY a.created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ArticleView>(&query)
            .bind(follower_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }
}
