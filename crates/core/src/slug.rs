//! Slug derivation for article identifiers.
//!
//! A slug is the title with every space replaced by a hyphen. Nothing else
//! is normalized: case, punctuation, and unicode are preserved, and
//! collisions are rejected by the caller rather than disambiguated.

/// Derive a URL slug from an article title.
pub fn slug_from_title(title: &str) -> String {
    title.split(' ').collect::<Vec<_>>().join("-")
}
