//! HTTP handlers, one module per component of the content/social model.

pub mod accounts;
pub mod articles;
pub mod comments;
pub mod profiles;
pub mod tags;
