//! Article entity model, filter parameters, and the viewer-relative read
//! projection.

use sqlx::FromRow;

use conduit_core::types::{DbId, Timestamp};

/// Full article row from the `articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article. The slug is derived from the title by the
/// caller before this reaches the repository.
#[derive(Debug)]
pub struct CreateArticle {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: DbId,
}

/// DTO for partially updating an article. When the title changes, the caller
/// recomputes `slug` and supplies both; only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateArticle {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

/// Optional filter terms for the article listing. Absent terms contribute no
/// predicate; present terms are ANDed together.
#[derive(Debug, Default)]
pub struct ArticleFilter {
    /// Match articles carrying this tag name.
    pub tag: Option<String>,
    /// Match articles authored by this username.
    pub author: Option<String>,
    /// Match articles favorited by this account (already resolved from a
    /// username by the caller).
    pub favorited_by: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Read projection of an article for a specific viewer: the article row
/// joined with its tags, favorite state, and author profile (including
/// whether the viewer follows the author).
#[derive(Debug, Clone, FromRow)]
pub struct ArticleView {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Whether the viewer has favorited this article; false for anonymous.
    pub favorited: bool,
    pub favorites_count: i64,
    pub author_username: String,
    pub author_bio: Option<String>,
    pub author_image: Option<String>,
    /// Whether the viewer follows the author; false for anonymous.
    pub following_author: bool,
}
