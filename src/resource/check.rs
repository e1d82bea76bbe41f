use tracing::info;

use crate::core::models::{CheckRequest, Version};
use crate::core::pattern::MessagePattern;
use crate::core::timestamp::{self, INITIAL_TS};
use crate::errors::SlackError;
use crate::slack::SlackClient;

/// Finds messages newer than the last checkpoint in every channel the bot is
/// a member of.
///
/// Channels are walked in membership order and each history page newest
/// first; the collected list is reversed before returning so the orchestrator
/// sees the oldest message first. Without a previous version only one message
/// is returned, which becomes the initial checkpoint.
///
/// # Errors
///
/// Returns an error if the pattern is invalid or any Slack call fails.
pub async fn check(
    client: &SlackClient,
    request: &CheckRequest,
) -> Result<Vec<Version>, SlackError> {
    let source = &request.source;
    let pattern = MessagePattern::from_source(source)?;

    let channels = client
        .member_channels(&source.bot_access_token, &source.bot_user_id)
        .await?;

    let names: Vec<&str> = channels
        .iter()
        .map(|c| c.name.as_deref().unwrap_or(c.id.as_str()))
        .collect();
    info!("Bot is in these channels: {}", names.join(", "));

    let last_checked = request.last_checked();
    if let Some(ts) = last_checked {
        info!("Last checked: {}", ts);
    }
    let checkpoint = last_checked.unwrap_or(INITIAL_TS);

    let mut versions = Vec::new();
    for channel in &channels {
        let messages = client
            .channel_history(&source.user_access_token, &channel.id)
            .await?;

        versions.extend(
            messages
                .into_iter()
                .filter(|m| timestamp::is_after(&m.ts, checkpoint))
                .filter(|m| pattern.as_ref().is_none_or(|p| p.matches(m.text())))
                .map(|m| Version::new(channel.id.clone(), m.ts)),
        );
    }

    if last_checked.is_none() {
        versions.truncate(1);
    }
    versions.reverse();

    info!("Found {} new message(s)", versions.len());
    Ok(versions)
}
