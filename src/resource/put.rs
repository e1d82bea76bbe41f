use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::core::models::{PutRequest, Version};
use crate::errors::SlackError;
use crate::slack::{ApiParams, SlackClient};
use crate::utils::placeholders::interpolate_params;

/// Flattens `params` into form values. Strings pass through; anything else is
/// sent as its JSON text.
#[must_use]
pub fn form_params(params: &Map<String, Value>) -> ApiParams {
    params
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Files one level below each input directory, i.e. `inputs/*/*`, sorted.
#[must_use]
pub fn list_input_files(inputs: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(inputs)
        .into_iter()
        .flatten()
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .flat_map(|dir| fs::read_dir(dir.path()).into_iter().flatten().flatten())
        .map(|entry| entry.path())
        .collect();
    files.sort();
    files
}

/// Fills `{{path}}` placeholders from files under `inputs` and posts the
/// result with `chat.postMessage`. Returns the version of the new message.
///
/// # Errors
///
/// Returns an error if a placeholder cannot be resolved or the Slack call
/// fails.
pub async fn put(
    client: &SlackClient,
    request: &PutRequest,
    inputs: &Path,
) -> Result<Version, SlackError> {
    let params = form_params(&request.params);
    info!("Params: {:?}", params);

    let files: Vec<String> = list_input_files(inputs)
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    info!("Files:\n  {}", files.join("\n  "));

    let message = interpolate_params(&params, inputs)?;

    let response = client
        .post_message(&request.source.bot_access_token, &message)
        .await?;

    let version = response.into_version();
    info!("Posted message {} to {}", version.ts, version.channel);
    Ok(version)
}
