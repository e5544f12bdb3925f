//! Comment entity model and read projection.

use sqlx::FromRow;

use conduit_core::types::{DbId, Timestamp};

/// Full comment row from the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub body: String,
    pub article_id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Read projection of a comment with its author's profile, viewer-relative.
#[derive(Debug, Clone, FromRow)]
pub struct CommentView {
    pub id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_username: String,
    pub author_bio: Option<String>,
    pub author_image: Option<String>,
    /// Whether the viewer follows the comment's author; false for anonymous.
    pub following_author: bool,
}
