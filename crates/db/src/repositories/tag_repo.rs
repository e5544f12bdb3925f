//! Repository for the derived tag view.
//!
//! Tag rows are owned by their article and inserted inside
//! `ArticleRepo::create`'s transaction; this repository only exposes the
//! derived distinct-name listing.

use sqlx::PgPool;

/// Provides read access to the tag corpus.
pub struct TagRepo;

impl TagRepo {
    /// The set of unique tag names across all articles. Order unspecified.
    pub async fn list_distinct_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT tag_name FROM article_tags")
            .fetch_all(pool)
            .await
    }
}
