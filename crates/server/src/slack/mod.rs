//! Slack Web API integration.
//!
//! This module provides:
//! - [`SlackClient`] for posting messages
//! - Wire types for `chat.postMessage`
//!
//! Posting is best-effort: a failed post is logged and dropped, and the
//! webhook response that triggered it is never affected.

mod client;
mod error;
mod types;

pub use client::SlackClient;
pub use error::SlackError;
pub use types::{Attachment, PostMessage, PostMessageResponse};
