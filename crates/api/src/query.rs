//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` /
/// `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the filtered article listing
/// (`?tag=&author=&favorited=&limit=&offset=`).
///
/// Absent terms constrain nothing; present terms are ANDed. `favorited` is a
/// username, resolved to an account before the query runs.
#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorited: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
