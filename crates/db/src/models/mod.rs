//! Row structs and create/patch DTOs, one module per entity.

pub mod account;
pub mod article;
pub mod comment;
