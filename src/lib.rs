//! slack-resource - a Concourse CI resource for Slack messages.
//!
//! The resource implements the three verbs a Concourse resource type exposes:
//! 1. `check` lists new messages, in channels the bot belongs to, that match
//!    an optional pattern
//! 2. `in` writes one message's text, capture groups, author, channel and
//!    timestamp into a directory
//! 3. `out` posts a message whose params may pull in files written by earlier
//!    `in` steps through `{{resource/file}}` placeholders
//!
//! # Architecture
//!
//! The system uses:
//! - reqwest for form-encoded calls to the Slack Web API
//! - serde / `serde_json` for the stdin and stdout JSON contract
//! - tracing for diagnostics mirrored to a log file and stderr
//! - Tokio for the (single-threaded) async runtime
//!
//! # Example
//!
//! ```no_run
//! use slack_resource::resource::{self, Command};
//! use slack_resource::slack::SlackClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SlackClient::default();
//!     let body = r#"{"source": {"bot_access_token": "xoxb-...",
//!                               "user_access_token": "xoxp-...",
//!                               "bot_user_id": "U0BOT",
//!                               "regexp": "deploy (\\w+)"}}"#;
//!
//!     let versions = resource::dispatch(&client, Command::Check, body, &[]).await?;
//!     println!("{versions}");
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod logging;
pub mod resource;
pub mod slack;
pub mod utils;

pub use errors::SlackError;
