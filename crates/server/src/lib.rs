//! Emojibot server library.
//!
//! Everything around the core pipeline: configuration and secret
//! resolution, the Slack Web API client, the axum routes, and shared
//! application state. The binary in `main.rs` wires these together and
//! picks the entry adapter (standalone listener or Lambda).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod secrets;
pub mod slack;
pub mod state;
