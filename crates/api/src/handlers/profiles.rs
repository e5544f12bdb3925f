//! Handlers for profiles and the follow graph.
//!
//! Follow and unfollow are idempotent: repeating either leaves exactly one
//! (or zero) relation row and returns the same profile projection.

use axum::extract::{Path, State};
use axum::Json;

use conduit_core::error::CoreError;
use conduit_db::models::account::Account;
use conduit_db::repositories::{AccountRepo, FollowRepo};

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::{ProfileBody, ProfileDto, ProfilesBody};
use crate::state::AppState;

/// GET /api/profiles/{username}
///
/// Profile projection for the (possibly anonymous) viewer.
pub async fn get_profile(
    viewer: OptionalAuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<ProfileBody>> {
    let account = find_by_username(&state, &username).await?;
    let following = FollowRepo::is_following(&state.pool, account.id, viewer.account_id()).await?;

    Ok(Json(ProfileBody {
        profile: ProfileDto::from_account(&account, following),
    }))
}

/// POST /api/profiles/{username}/follow
///
/// Idempotent: following an already-followed profile is a no-op that still
/// returns the projection with `following=true`.
pub async fn follow(
    user: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<ProfileBody>> {
    let target = find_by_username(&state, &username).await?;
    let follower = find_by_id(&state, user.account_id).await?;

    let inserted = FollowRepo::insert(&state.pool, target.id, follower.id).await?;
    if inserted {
        tracing::info!(
            follower_id = follower.id,
            followed = %target.username,
            "Follow relation created"
        );
    }

    Ok(Json(ProfileBody {
        profile: ProfileDto::from_account(&target, true),
    }))
}

/// DELETE /api/profiles/{username}/follow
///
/// Idempotent: unfollowing a profile that is not followed is a no-op that
/// still returns the projection with `following=false`.
pub async fn unfollow(
    user: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<ProfileBody>> {
    let target = find_by_username(&state, &username).await?;
    let follower = find_by_id(&state, user.account_id).await?;

    let deleted = FollowRepo::delete(&state.pool, target.id, follower.id).await?;
    if deleted {
        tracing::info!(
            follower_id = follower.id,
            followed = %target.username,
            "Follow relation removed"
        );
    }

    Ok(Json(ProfileBody {
        profile: ProfileDto::from_account(&target, false),
    }))
}

/// GET /api/profiles/followers
///
/// Accounts following the caller. The `following` flag is not asserted for
/// these profiles: the listing does not claim the caller follows them back.
pub async fn list_followers(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProfilesBody>> {
    let account = find_by_id(&state, user.account_id).await?;
    let followers = FollowRepo::list_followers(&state.pool, account.id).await?;

    Ok(Json(ProfilesBody {
        profiles: followers
            .iter()
            .map(|a| ProfileDto::from_account(a, false))
            .collect(),
    }))
}

/// GET /api/profiles/followings
///
/// Accounts the caller follows; by construction every returned profile has
/// `following=true`.
pub async fn list_followings(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProfilesBody>> {
    let account = find_by_id(&state, user.account_id).await?;
    let followings = FollowRepo::list_followings(&state.pool, account.id).await?;

    Ok(Json(ProfilesBody {
        profiles: followings
            .iter()
            .map(|a| ProfileDto::from_account(a, true))
            .collect(),
    }))
}

async fn find_by_username(state: &AppState, username: &str) -> AppResult<Account> {
    Ok(AccountRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", username))?)
}

async fn find_by_id(state: &AppState, id: conduit_core::types::DbId) -> AppResult<Account> {
    Ok(AccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Account", id.to_string()))?)
}
