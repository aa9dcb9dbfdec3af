//! Application state shared across handlers.

use std::sync::Arc;

use emojibot_core::SignatureVerifier;

use crate::config::Config;
use crate::slack::SlackClient;

/// Application state shared across all handlers.
///
/// Built once at startup from the resolved configuration and never
/// mutated afterwards, so concurrent handlers share it without
/// synchronization.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    verifier: SignatureVerifier,
    slack: SlackClient,
}

impl AppState {
    /// Build state from resolved configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            SignatureVerifier::new(config.signing_secret.clone()),
            SlackClient::new(config.bot_token.clone(), config.channel_id.clone()),
        )
    }

    /// Build state from an explicit verifier and client.
    ///
    /// Tests use this to point the Slack client at a stub server.
    #[must_use]
    pub fn from_parts(verifier: SignatureVerifier, slack: SlackClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { verifier, slack }),
        }
    }

    /// The inbound request verifier.
    #[must_use]
    pub fn verifier(&self) -> &SignatureVerifier {
        &self.inner.verifier
    }

    /// The outbound Slack client.
    #[must_use]
    pub fn slack(&self) -> &SlackClient {
        &self.inner.slack
    }
}
