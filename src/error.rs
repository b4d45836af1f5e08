use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::StatusMessage;

/// ApiError
///
/// The failure taxonomy of the whole API. Every verifier, guard and handler
/// outcome is one of these tagged variants, translated into an HTTP response
/// exactly once, at the boundary. Store failures keep their source error for
/// the log line but never leak details to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Sign-in email matched no account.
    #[error("Incorrect Email")]
    InvalidEmail,
    /// Sign-in password did not match the stored hash.
    #[error("Incorrect Password")]
    InvalidPassword,
    /// Missing, malformed, unsigned or expired bearer token.
    #[error("Unauthorized")]
    Unauthenticated,
    /// A referenced record no longer exists.
    #[error("{0}")]
    NotFound(&'static str),
    /// Uniqueness violation (duplicate course title).
    #[error("{0}")]
    Conflict(&'static str),
    /// Any error from the backing store. Logged; surfaced generically.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
    /// Unexpected internal failure (hashing task, token signing).
    #[error("Error Occurred")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidEmail | ApiError::InvalidPassword => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, (*msg).to_string()),
            ApiError::Store(e) => {
                tracing::error!("store failure: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error Occurred".to_string())
            }
            ApiError::Internal => {
                tracing::error!("internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error Occurred".to_string())
            }
        };

        (status, Json(StatusMessage::fail(message))).into_response()
    }
}
