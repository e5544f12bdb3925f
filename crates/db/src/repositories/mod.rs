//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod article_repo;
pub mod comment_repo;
pub mod favorite_repo;
pub mod follow_repo;
pub mod tag_repo;

pub use account_repo::AccountRepo;
pub use article_repo::ArticleRepo;
pub use comment_repo::CommentRepo;
pub use favorite_repo::FavoriteRepo;
pub use follow_repo::FollowRepo;
pub use tag_repo::TagRepo;
