//! Domain primitives shared by the persistence and HTTP layers.

pub mod error;
pub mod pagination;
pub mod slug;
pub mod types;
