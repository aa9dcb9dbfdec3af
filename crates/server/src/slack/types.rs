//! Wire types for the `chat.postMessage` call.
//!
//! See: <https://api.slack.com/methods/chat.postMessage>

use serde::{Deserialize, Serialize};

/// Request body for `chat.postMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessage {
    /// Channel ID to post to.
    pub channel: String,
    /// Message text.
    pub text: String,
    /// Legacy attachments carrying the emoji preview.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// A message attachment with an inline image preview.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    /// Attachment text (the emoji name).
    pub text: String,
    /// Image shown under the attachment.
    pub image_url: String,
}

/// Response from posting a message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    /// Whether the request was successful.
    pub ok: bool,
    /// Channel ID where the message was posted.
    #[serde(default)]
    pub channel: Option<String>,
    /// Message timestamp (unique ID).
    #[serde(default)]
    pub ts: Option<String>,
    /// Error message if not ok.
    #[serde(default)]
    pub error: Option<String>,
}
