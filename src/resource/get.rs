use std::fs;
use std::path::Path;

use tracing::info;

use crate::core::models::{GetRequest, Version};
use crate::core::pattern::MessagePattern;
use crate::errors::SlackError;
use crate::slack::SlackClient;

pub const MESSAGE_TEXT_FILE: &str = "message_text";
pub const USER_FILE: &str = "user";
pub const CHANNEL_FILE: &str = "channel";
pub const TS_FILE: &str = "ts";

/// File holding the `index`th capture group of `source.regexp`.
#[must_use]
pub fn capture_file_name(index: usize) -> String {
    format!("{MESSAGE_TEXT_FILE}_{index}")
}

fn write_file(destination: &Path, name: &str, content: &str) -> Result<(), SlackError> {
    let path = destination.join(name);
    fs::write(&path, content).map_err(|e| SlackError::io(&path, &e))
}

/// Fetches the message `request.version` points at and writes its fields as
/// files into `destination`. Returns the version unchanged.
///
/// # Errors
///
/// Returns an error if the Slack call fails, the configured pattern does not
/// match the message, or a file cannot be written.
pub async fn get(
    client: &SlackClient,
    request: &GetRequest,
    destination: &Path,
) -> Result<Version, SlackError> {
    let source = &request.source;
    let version = &request.version;

    let message = client
        .message_at(&source.user_access_token, version)
        .await?;
    let text = message.text();

    if let Some(pattern) = MessagePattern::from_source(source)? {
        let groups = pattern.groups(text).ok_or_else(|| {
            SlackError::NoMatch(format!("{} against message {}", pattern.as_str(), message.ts))
        })?;
        for (index, group) in groups.iter().enumerate() {
            write_file(destination, &capture_file_name(index), group)?;
        }
        info!("Wrote {} capture group(s)", groups.len());
    }

    let author = message.author().ok_or_else(|| {
        SlackError::ResponseError(format!(
            "message {}: missing field `user` or `username`",
            message.ts
        ))
    })?;

    write_file(destination, MESSAGE_TEXT_FILE, text)?;
    write_file(destination, USER_FILE, author)?;
    write_file(destination, CHANNEL_FILE, &version.channel)?;
    write_file(destination, TS_FILE, &version.ts)?;

    info!("Wrote message {} to {}", version.ts, destination.display());
    Ok(version.clone())
}
