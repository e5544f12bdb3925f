//! Account entity model and DTOs.

use sqlx::FromRow;

use conduit_core::types::{DbId, Timestamp};

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- never serialize this to API responses
/// directly; the HTTP layer builds its own user/profile views.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new account.
#[derive(Debug)]
pub struct CreateAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// DTO for partially updating an account. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateAccount {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}
