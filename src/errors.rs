use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to parse resource request: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Unexpected Slack API response: {0}")]
    ResponseError(String),

    #[error("Failed to access file: {0}")]
    IoError(String),

    #[error("Invalid message pattern: {0}")]
    PatternError(String),

    #[error("Message text does not match pattern: {0}")]
    NoMatch(String),

    #[error("Failed to resolve placeholders: {}", .0.join(", "))]
    UnresolvedPlaceholders(Vec<String>),

    #[error("Unknown resource command: {0} (expected check, in or out)")]
    UnknownCommand(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::HttpError(error.to_string())
    }
}

impl From<regex::Error> for SlackError {
    fn from(error: regex::Error) -> Self {
        SlackError::PatternError(error.to_string())
    }
}

impl SlackError {
    /// Wraps an I/O failure together with the path it happened on.
    #[must_use]
    pub fn io(path: &std::path::Path, error: &std::io::Error) -> Self {
        SlackError::IoError(format!("{}: {error}", path.display()))
    }
}
