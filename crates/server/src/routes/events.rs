//! Slack Events API webhook handler.
//!
//! The pipeline is verify, then parse, then route. Verification and
//! parsing failures reject the request with a 400; everything the router
//! ignores is acknowledged with an empty 200 so Slack does not retry it.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{error, info, instrument};

use emojibot_core::{Envelope, Outcome, route};

use crate::error::AppError;
use crate::state::AppState;

/// Create the webhook route. Slack posts every event to the root path.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(handle_event))
}

/// Handle one Events API delivery.
#[instrument(skip(state, headers, body))]
async fn handle_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let verified = state.verifier().verify(&headers, &body)?;
    let envelope = Envelope::parse(verified)?;

    match route(&envelope) {
        Outcome::Challenge(challenge) => {
            // The handshake reply carries the literal content type "text",
            // matching what Slack's URL registration flow accepts.
            Ok((
                [(header::CONTENT_TYPE, HeaderValue::from_static("text"))],
                challenge,
            )
                .into_response())
        }
        Outcome::Notify(notification) => {
            info!(emoji = %notification.emoji_name, "got_new_emoji");

            // The post must complete before the 200 is returned: in lambda
            // mode the environment freezes once the response is posted, and
            // a detached task would never be polled again. The response
            // itself does not depend on the outcome; a failed post is
            // logged and dropped.
            if let Err(e) = state.slack().notify_new_emoji(&notification).await {
                error!(error = %e, "post_to_slack_err");
            }

            Ok(StatusCode::OK.into_response())
        }
        Outcome::Ignored => {
            info!(envelope = ?envelope, "ignored_event");
            Ok(StatusCode::OK.into_response())
        }
    }
}
