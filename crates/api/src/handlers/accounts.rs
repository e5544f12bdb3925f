//! Handlers for registration, login, and the current account.
//!
//! Email and username uniqueness is pre-checked here so duplicates become
//! structured 422 rejections; the `uq_accounts_*` constraints remain the
//! backstop for races.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use conduit_core::error::CoreError;
use conduit_db::models::account::{Account, CreateAccount, UpdateAccount};
use conduit_db::repositories::AccountRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{UserBody, UserDto};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub user: RegisterRequest,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub user: LoginRequest,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub user: UpdateUserRequest,
}

/// Partial update: only supplied fields overwrite.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// POST /api/users
///
/// Register a new account. Duplicate email or username is a 422.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> AppResult<Json<UserBody>> {
    let input = body.user;
    input.validate()?;

    if AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::BadRequest(format!(
            "Account with email {} already exists",
            input.email
        ))));
    }
    if AccountRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::BadRequest(format!(
            "Account with username {} already exists",
            input.username
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            username: input.username,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(account_id = account.id, username = %account.username, "Account registered");

    user_body(&state, &account).map(Json)
}

/// POST /api/users/login
///
/// Authenticate by email and password. Unknown email is a 404; a wrong
/// password is a 401.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> AppResult<Json<UserBody>> {
    let input = body.user;

    let account = AccountRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| CoreError::not_found("Account with email", &input.email))?;

    let verified = verify_password(&input.password, &account.password_hash)
        .map_err(|e| CoreError::Internal(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::Core(CoreError::Unauthorized(format!(
            "Invalid password for account with email {}",
            input.email
        ))));
    }

    user_body(&state, &account).map(Json)
}

/// GET /api/user
///
/// The authenticated account, with a fresh token.
pub async fn current_user(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserBody>> {
    let account = AccountRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", user.account_id.to_string()))?;

    user_body(&state, &account).map(Json)
}

/// PUT /api/user
///
/// Partial update of the authenticated account. Only supplied fields
/// overwrite; new email/username values are pre-checked for uniqueness
/// against every other account.
pub async fn update_user(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<UpdateUserBody>,
) -> AppResult<Json<UserBody>> {
    let input = body.user;

    if let Some(email) = &input.email {
        if let Some(existing) = AccountRepo::find_by_email(&state.pool, email).await? {
            if existing.id != user.account_id {
                return Err(AppError::Core(CoreError::BadRequest(format!(
                    "Account with email {email} already exists"
                ))));
            }
        }
    }
    if let Some(username) = &input.username {
        if let Some(existing) = AccountRepo::find_by_username(&state.pool, username).await? {
            if existing.id != user.account_id {
                return Err(AppError::Core(CoreError::BadRequest(format!(
                    "Account with username {username} already exists"
                ))));
            }
        }
    }

    let password_hash = match &input.password {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))?,
        ),
        None => None,
    };

    let account = AccountRepo::update(
        &state.pool,
        user.account_id,
        &UpdateAccount {
            username: input.username,
            email: input.email,
            password_hash,
            bio: input.bio,
            image: input.image,
        },
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Account", user.account_id.to_string()))?;

    tracing::info!(account_id = account.id, "Account updated");

    user_body(&state, &account).map(Json)
}

/// Build the `{user}` envelope with a freshly issued token.
fn user_body(state: &AppState, account: &Account) -> AppResult<UserBody> {
    let token = generate_token(account.id, &state.config.jwt)
        .map_err(|e| CoreError::Internal(format!("Token generation failed: {e}")))?;
    Ok(UserBody {
        user: UserDto::from_account(account, token),
    })
}
