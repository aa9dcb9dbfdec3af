//! Routing of parsed envelopes to outcomes.
//!
//! This is the only place business logic lives. [`route`] is a pure,
//! total function over [`Envelope`]: every input maps to exactly one
//! outcome and nothing here performs I/O, so the decision table is
//! independently testable. The caller is responsible for echoing
//! challenges, posting notifications, and logging ignored events.

use crate::event::{Envelope, InnerEvent};

/// Notification derived from a qualifying emoji-added event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Human-readable message line.
    pub text: String,
    /// Name of the new emoji.
    pub emoji_name: String,
    /// URL of the emoji image, shown as an attachment preview.
    pub image_url: String,
}

impl Notification {
    fn for_new_emoji(name: &str, value: &str) -> Self {
        Self {
            text: format!("New emoji: {name}"),
            emoji_name: name.to_string(),
            image_url: value.to_string(),
        }
    }
}

/// What the webhook handler must do with a parsed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Echo the challenge string verbatim as the response body.
    Challenge(String),
    /// Post the notification to the configured channel.
    Notify(Notification),
    /// Acknowledge with an empty 200 and do nothing else.
    Ignored,
}

/// Route an envelope to its outcome.
///
/// | Outer             | Inner          | subtype | Outcome     |
/// |-------------------|----------------|---------|-------------|
/// | `UrlVerification` | -              | -       | `Challenge` |
/// | `EventCallback`   | `EmojiChanged` | `add`   | `Notify`    |
/// | `EventCallback`   | `EmojiChanged` | other   | `Ignored`   |
/// | `EventCallback`   | other          | -       | `Ignored`   |
/// | other             | -              | -       | `Ignored`   |
///
/// An `add` event missing its name or image URL is ignored: there is
/// nothing to announce.
#[must_use]
pub fn route(envelope: &Envelope) -> Outcome {
    match envelope {
        Envelope::UrlVerification { challenge } => Outcome::Challenge(challenge.clone()),
        Envelope::EventCallback {
            event:
                InnerEvent::EmojiChanged {
                    subtype,
                    name: Some(name),
                    value: Some(value),
                },
        } if subtype == "add" => Outcome::Notify(Notification::for_new_emoji(name, value)),
        Envelope::EventCallback { .. } | Envelope::Unrecognized => Outcome::Ignored,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn emoji_changed(subtype: &str, name: Option<&str>, value: Option<&str>) -> Envelope {
        Envelope::EventCallback {
            event: InnerEvent::EmojiChanged {
                subtype: subtype.to_string(),
                name: name.map(String::from),
                value: value.map(String::from),
            },
        }
    }

    #[test]
    fn url_verification_echoes_challenge_exactly() {
        let envelope = Envelope::UrlVerification {
            challenge: "abc123".to_string(),
        };

        assert_eq!(route(&envelope), Outcome::Challenge("abc123".to_string()));
    }

    #[test]
    fn emoji_add_produces_notification() {
        let envelope = emoji_changed("add", Some("partyparrot"), Some("https://x/p.gif"));

        let Outcome::Notify(notification) = route(&envelope) else {
            panic!("expected Notify");
        };
        assert!(notification.text.contains("partyparrot"));
        assert_eq!(notification.text, "New emoji: partyparrot");
        assert_eq!(notification.emoji_name, "partyparrot");
        assert_eq!(notification.image_url, "https://x/p.gif");
    }

    #[test]
    fn emoji_remove_is_ignored() {
        let envelope = emoji_changed("remove", None, None);
        assert_eq!(route(&envelope), Outcome::Ignored);
    }

    #[test]
    fn emoji_rename_is_ignored() {
        let envelope = emoji_changed("rename", Some("new_name"), Some("https://x/p.gif"));
        assert_eq!(route(&envelope), Outcome::Ignored);
    }

    #[test]
    fn emoji_add_without_image_url_is_ignored() {
        let envelope = emoji_changed("add", Some("partyparrot"), None);
        assert_eq!(route(&envelope), Outcome::Ignored);
    }

    #[test]
    fn unrecognized_inner_event_is_ignored() {
        let envelope = Envelope::EventCallback {
            event: InnerEvent::Unrecognized,
        };
        assert_eq!(route(&envelope), Outcome::Ignored);
    }

    #[test]
    fn unrecognized_outer_type_is_ignored() {
        assert_eq!(route(&Envelope::Unrecognized), Outcome::Ignored);
    }

    #[test]
    fn routing_is_idempotent() {
        let envelope = emoji_changed("add", Some("blob"), Some("https://x/b.png"));

        let first = route(&envelope);
        let second = route(&envelope);
        assert_eq!(first, second);
    }
}
