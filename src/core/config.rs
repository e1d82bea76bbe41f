use std::env;
use std::path::PathBuf;

use url::Url;

use crate::errors::SlackError;

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL the Web API method name is appended to.
    pub slack_api_url: String,
    /// Where `<command>.log` and `body.json` are written.
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if `SLACK_API_URL` is set but is not a valid URL.
    pub fn from_env() -> Result<Self, SlackError> {
        let slack_api_url = match env::var("SLACK_API_URL") {
            Ok(url) if !url.trim().is_empty() => normalize_api_url(&url)?,
            _ => DEFAULT_SLACK_API_URL.to_string(),
        };

        let log_dir = env::var_os("SLACK_RESOURCE_LOG_DIR")
            .filter(|dir| !dir.is_empty())
            .map_or_else(env::temp_dir, PathBuf::from);

        Ok(Self {
            slack_api_url,
            log_dir,
        })
    }
}

/// # Errors
///
/// Returns an error if `raw` does not parse as an absolute URL.
pub fn normalize_api_url(raw: &str) -> Result<String, SlackError> {
    let trimmed = raw.trim();
    Url::parse(trimmed).map_err(|e| SlackError::ConfigError(format!("SLACK_API_URL: {e}")))?;
    Ok(trimmed.trim_end_matches('/').to_string())
}
