#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {key} is not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a lookup miss on a named entity.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            key: key.into(),
        }
    }
}
