//! Slack Events API envelope types and parser.
//!
//! The Events API wraps every delivery in an outer envelope whose `type`
//! field distinguishes the URL-verification handshake from callback-wrapped
//! workspace events. Both the outer and inner discriminators are open sets:
//! Slack adds event types over time, so an unknown tag must parse into an
//! explicit unrecognized variant rather than fail. Only malformed JSON is a
//! parse error.
//!
//! See: <https://api.slack.com/apis/connections/events-api>

use serde::Deserialize;
use thiserror::Error;

/// The verified request body could not be deserialized.
#[derive(Debug, Error)]
#[error("malformed event payload: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Outer Events API envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Handshake sent when the events URL is registered. The challenge
    /// must be echoed back verbatim.
    UrlVerification { challenge: String },

    /// A workspace event wrapped in the callback envelope.
    EventCallback { event: InnerEvent },

    /// Any outer type this service does not know about.
    #[serde(other)]
    Unrecognized,
}

/// Inner workspace event, keyed by its own `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InnerEvent {
    /// The emoji set changed. Only `subtype == "add"` carries a name and
    /// image URL; removals and renames list affected names elsewhere.
    EmojiChanged {
        #[serde(default)]
        subtype: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        value: Option<String>,
    },

    /// Any inner event type this service does not handle.
    #[serde(other)]
    Unrecognized,
}

impl Envelope {
    /// Parse a verified request body.
    ///
    /// Unknown outer or inner `type` tags parse successfully into the
    /// `Unrecognized` variants; only malformed JSON fails.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the body is not well-formed JSON or is
    /// structurally incompatible with a known variant.
    pub fn parse(body: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_json::from_slice(body)?)
    }
}
