//! Slack Web API client module
//!
//! Every call is a form-encoded POST to `<base>/<method>` whose JSON body is
//! handed back as-is. The typed helpers below decode those bodies for the
//! four methods the resource needs.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::core::config::{AppConfig, DEFAULT_SLACK_API_URL};
use crate::core::models::{
    Channel, ConversationsResponse, Message, MessagesResponse, PostMessageResponse, Version,
};
use crate::errors::SlackError;

/// Form parameters for a Web API call.
pub type ApiParams = BTreeMap<String, String>;

/// Page size for `users.conversations`. Only the first page is read.
pub const CHANNELS_LIMIT: u32 = 50;

/// Parameter that never reaches the logs.
const TOKEN_PARAM: &str = "token";

/// Copy of `params` that is safe to log.
#[must_use]
pub fn redact(params: &ApiParams) -> BTreeMap<&str, &str> {
    params
        .iter()
        .filter(|(key, _)| key.as_str() != TOKEN_PARAM)
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect()
}

/// Decodes a raw Web API response into `T`.
///
/// A body carrying `"ok": false` is reported as `ApiError` with Slack's error
/// code; anything else that does not fit `T` is a `ResponseError` naming the
/// method and the offending key.
///
/// # Errors
///
/// See above.
pub fn decode_response<T: DeserializeOwned>(method: &str, body: Value) -> Result<T, SlackError> {
    if body.get("ok").and_then(Value::as_bool) == Some(false) {
        let code = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        return Err(SlackError::ApiError(format!("{method}: {code}")));
    }

    serde_json::from_value(body).map_err(|e| SlackError::ResponseError(format!("{method}: {e}")))
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> ApiParams {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Slack Web API client
pub struct SlackClient {
    http: Client,
    base_url: String,
}

impl SlackClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.slack_api_url.clone())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls `method` with `params` and returns the decoded JSON body.
    ///
    /// Slack's `ok` flag is not inspected here.
    ///
    /// # Errors
    ///
    /// Returns `HttpError` if the request cannot be sent or read, and
    /// `ResponseError` if the body is not JSON.
    pub async fn call(&self, method: &str, params: &ApiParams) -> Result<Value, SlackError> {
        info!("Calling Slack API {} {:?}", method, redact(params));

        let response = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .form(params)
            .send()
            .await?;
        let text = response.text().await?;

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| SlackError::ResponseError(format!("{method}: invalid JSON: {e}")))?;

        info!("{} response: {}", method, body);
        Ok(body)
    }

    async fn call_decoded<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &ApiParams,
    ) -> Result<T, SlackError> {
        let body = self.call(method, params).await?;
        decode_response(method, body)
    }

    /// First page of the channels `user_id` is a member of.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response has no `channels`.
    pub async fn member_channels(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<Channel>, SlackError> {
        let limit = CHANNELS_LIMIT.to_string();
        let response: ConversationsResponse = self
            .call_decoded(
                "users.conversations",
                &params([("token", token), ("user", user_id), ("limit", limit.as_str())]),
            )
            .await?;
        Ok(response.channels)
    }

    /// Latest page of a channel's history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response has no `messages`.
    pub async fn channel_history(
        &self,
        token: &str,
        channel_id: &str,
    ) -> Result<Vec<Message>, SlackError> {
        let response: MessagesResponse = self
            .call_decoded(
                "conversations.history",
                &params([("token", token), ("channel", channel_id)]),
            )
            .await?;
        Ok(response.messages)
    }

    /// The single message a version points at.
    ///
    /// Thread replies are looked up through `conversations.replies` anchored
    /// at `thread_ts`; everything else through `conversations.history`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or no message comes back.
    pub async fn message_at(&self, token: &str, version: &Version) -> Result<Message, SlackError> {
        let mut request = params([
            ("token", token),
            ("channel", version.channel.as_str()),
            ("inclusive", "true"),
            ("oldest", version.ts.as_str()),
            ("limit", "1"),
        ]);

        let method = match &version.thread_ts {
            Some(thread_ts) => {
                request.insert("ts".to_string(), thread_ts.clone());
                "conversations.replies"
            }
            None => "conversations.history",
        };

        let response: MessagesResponse = self.call_decoded(method, &request).await?;
        response
            .messages
            .into_iter()
            .next()
            .ok_or_else(|| SlackError::ResponseError(format!("{method}: missing field `messages[0]`")))
    }

    /// Posts a message. `message` holds `chat.postMessage` arguments; the token
    /// is added here.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response lacks `channel`/`ts`.
    pub async fn post_message(
        &self,
        token: &str,
        message: &ApiParams,
    ) -> Result<PostMessageResponse, SlackError> {
        let mut request = message.clone();
        request.insert(TOKEN_PARAM.to_string(), token.to_string());
        self.call_decoded("chat.postMessage", &request).await
    }
}

impl Default for SlackClient {
    fn default() -> Self {
        Self::new(DEFAULT_SLACK_API_URL)
    }
}
