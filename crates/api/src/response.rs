//! Wire-format response types.
//!
//! Every payload is grouped under a named root key (`user`, `profile`,
//! `article`/`articles`, `comment`/`comments`, `tags`) with camelCase
//! fields. Handlers build these from the repository views instead of
//! emitting ad-hoc `serde_json::json!` blobs.

use serde::Serialize;

use conduit_core::types::{DbId, Timestamp};
use conduit_db::models::account::Account;
use conduit_db::models::article::ArticleView;
use conduit_db::models::comment::CommentView;

/// The authenticated account, token included.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub email: String,
    pub token: String,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl UserDto {
    pub fn from_account(account: &Account, token: String) -> Self {
        Self {
            email: account.email.clone(),
            token,
            username: account.username.clone(),
            bio: account.bio.clone(),
            image: account.image.clone(),
        }
    }
}

/// Another account as seen by the viewer.
#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

impl ProfileDto {
    pub fn from_account(account: &Account, following: bool) -> Self {
        Self {
            username: account.username.clone(),
            bio: account.bio.clone(),
            image: account.image.clone(),
            following,
        }
    }
}

/// Article projection for the wire: the repository view with the author
/// profile nested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub favorited: bool,
    pub favorites_count: i64,
    pub author: ProfileDto,
}

impl From<ArticleView> for ArticleDto {
    fn from(view: ArticleView) -> Self {
        Self {
            slug: view.slug,
            title: view.title,
            description: view.description,
            body: view.body,
            tag_list: view.tag_list,
            created_at: view.created_at,
            updated_at: view.updated_at,
            favorited: view.favorited,
            favorites_count: view.favorites_count,
            author: ProfileDto {
                username: view.author_username,
                bio: view.author_bio,
                image: view.author_image,
                following: view.following_author,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: ProfileDto,
}

impl From<CommentView> for CommentDto {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.id,
            body: view.body,
            created_at: view.created_at,
            updated_at: view.updated_at,
            author: ProfileDto {
                username: view.author_username,
                bio: view.author_bio,
                image: view.author_image,
                following: view.following_author,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Root-key envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub profile: ProfileDto,
}

#[derive(Debug, Serialize)]
pub struct ProfilesBody {
    pub profiles: Vec<ProfileDto>,
}

#[derive(Debug, Serialize)]
pub struct ArticleBody {
    pub article: ArticleDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesBody {
    pub articles: Vec<ArticleDto>,
    /// Count of articles on this page.
    pub articles_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub comment: CommentDto,
}

#[derive(Debug, Serialize)]
pub struct CommentsBody {
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Serialize)]
pub struct TagsBody {
    pub tags: Vec<String>,
}
