use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use conduit_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// every error body is a message list under `errors.body`, the shape the
/// wire format uses for structured rejections.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `conduit_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Payload validation failure with a list of messages.
    #[error("Validation failed")]
    Validation(Vec<String>),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field} {msg}"),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        AppError::Validation(messages)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, messages) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, vec![core.to_string()]),
                CoreError::BadRequest(msg) => (StatusCode::UNPROCESSABLE_ENTITY, vec![msg]),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, vec![msg]),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, vec![msg]),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        vec!["An internal error occurred".to_string()],
                    )
                }
            },

            // A constraint violation that slips past a pre-check (e.g. two
            // creates racing on one slug) is unexpected for this request and
            // gets no domain-specific message.
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["An internal error occurred".to_string()],
                )
            }

            AppError::Validation(messages) => (StatusCode::UNPROCESSABLE_ENTITY, messages),
        };

        let body = json!({ "errors": { "body": messages } });
        (status, axum::Json(body)).into_response()
    }
}
