//! Handler for the derived distinct-tag listing.

use axum::extract::State;
use axum::Json;

use conduit_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::response::TagsBody;
use crate::state::AppState;

/// GET /api/tags
///
/// The set of unique tag names across all articles. Order unspecified.
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<TagsBody>> {
    let tags = TagRepo::list_distinct_names(&state.pool).await?;
    Ok(Json(TagsBody { tags }))
}
