//! Per-request error handling for the webhook route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use emojibot_core::{ParseError, SignatureError};
use thiserror::Error;

/// Errors a webhook request can fail with.
///
/// All variants are contained to the request that produced them and map
/// to a 400 with a generic body. The logged reason never includes the
/// signing secret or the presented signature.
#[derive(Debug, Error)]
pub enum AppError {
    /// Signature verification failed.
    #[error("signature validation failed: {0}")]
    Signature(#[from] SignatureError),

    /// The verified body could not be parsed.
    #[error("event parsing failed: {0}")]
    Parse(#[from] ParseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "webhook request rejected");

        // Don't expose failure details to the caller
        (StatusCode::BAD_REQUEST, "bad request").into_response()
    }
}
