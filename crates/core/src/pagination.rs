//! Limit/offset defaulting and clamping for paginated listings.

/// Page size applied when a listing request does not specify a limit.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Upper bound on page size regardless of what the caller asks for.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Resolve an optional limit to a value in `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

/// Resolve an optional offset to a non-negative value.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
