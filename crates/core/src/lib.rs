//! Emojibot core - request verification and event dispatch.
//!
//! This crate contains the part of the webhook pipeline with a real
//! correctness contract and nothing else:
//!
//! - [`signature`] - HMAC verification of inbound Slack requests
//! - [`event`] - the Events API envelope and its parser
//! - [`router`] - routing a parsed envelope to an outcome
//!
//! Everything here is pure: no I/O, no clocks outside the verifier's
//! freshness check, no HTTP types beyond header lookup. The server crate
//! owns the network on both sides.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod event;
pub mod router;
pub mod signature;

pub use event::{Envelope, InnerEvent, ParseError};
pub use router::{Notification, Outcome, route};
pub use signature::{SignatureError, SignatureVerifier};
