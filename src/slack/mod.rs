//! All Slack-specific functionality

pub mod client;

// Re-export main types for convenience
pub use client::{ApiParams, CHANNELS_LIMIT, SlackClient, decode_response, redact};
