use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resource configuration from the pipeline definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub bot_access_token: String,
    pub user_access_token: String,
    pub bot_user_id: String,
    #[serde(default)]
    pub regexp: Option<String>,
}

/// A checkpoint pointing at one Slack message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub channel: String,
    pub ts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    /// Fields we do not interpret but hand back unchanged from `in`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Version {
    #[must_use]
    pub fn new(channel: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ts: ts.into(),
            thread_ts: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_thread_ts(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }
}

/// What `check` receives as the previous version. Only `ts` matters here and
/// the orchestrator may send `{}` or `null` before the first version exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Checkpoint {
    #[serde(default)]
    pub ts: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    pub source: Source,
    #[serde(default)]
    pub version: Option<Checkpoint>,
}

impl CheckRequest {
    /// The last seen `ts`, or `None` when this is the first check.
    #[must_use]
    pub fn last_checked(&self) -> Option<&str> {
        self.version
            .as_ref()
            .and_then(|v| v.ts.as_deref())
            .filter(|ts| !ts.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetRequest {
    pub source: Source,
    pub version: Version,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    pub source: Source,
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// `{"version": ...}` as printed by `in` and `out`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionOutput {
    pub version: Version,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub ts: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Message {
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// The posting user id, falling back to the bot/integration username.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.user.as_deref().or(self.username.as_deref())
    }
}

/// `users.conversations` response.
#[derive(Debug, Deserialize)]
pub struct ConversationsResponse {
    pub channels: Vec<Channel>,
}

/// `conversations.history` / `conversations.replies` response.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

/// `chat.postMessage` response.
#[derive(Debug, Deserialize)]
pub struct PostMessageResponse {
    pub channel: String,
    pub ts: String,
    #[serde(default)]
    pub message: Option<PostedMessage>,
}

#[derive(Debug, Deserialize)]
pub struct PostedMessage {
    #[serde(default)]
    pub thread_ts: Option<String>,
}

impl PostMessageResponse {
    /// The version identifying the message that was just posted.
    #[must_use]
    pub fn into_version(self) -> Version {
        let thread_ts = self
            .message
            .and_then(|m| m.thread_ts)
            .filter(|ts| !ts.is_empty());

        let version = Version::new(self.channel, self.ts);
        match thread_ts {
            Some(thread_ts) => version.with_thread_ts(thread_ts),
            None => version,
        }
    }
}
