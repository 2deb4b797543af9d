//! Wire types for the two Slack Web API methods slackdump calls.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Message;
use crate::error::SlackdumpError;

/// `auth.test` method name.
pub const AUTH_TEST: &str = "auth.test";

/// `conversations.history` method name.
pub const CONVERSATIONS_HISTORY: &str = "conversations.history";

/// Successful `auth.test` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthIdentity {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
}

/// `conversations.history` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<RawMessage>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

impl HistoryResponse {
    /// Continuation cursor, or `None` when this is the last page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .map(|meta| meta.next_cursor.as_str())
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// One message record as Slack sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub reactions: Option<Vec<Value>>,
}

impl RawMessage {
    /// Converts the record into a [`Message`] for `channel`.
    ///
    /// Missing fields take their defaults; a `ts` that is not a decimal
    /// number is rejected.
    pub fn into_message(self, channel: &str) -> Result<Message, SlackdumpError> {
        let timestamp = match self.ts.as_deref() {
            None => 0.0,
            Some(ts) => ts
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .ok_or_else(|| {
                    SlackdumpError::malformed(CONVERSATIONS_HISTORY, format!("invalid ts '{ts}'"))
                })?,
        };

        Ok(Message {
            text: self.text.unwrap_or_default(),
            user: self.user.unwrap_or_default(),
            timestamp,
            channel: channel.to_string(),
            thread_ts: self.thread_ts,
            reply_count: self.reply_count.unwrap_or(0),
            reactions: self.reactions.unwrap_or_default(),
        })
    }
}

/// Decodes a Web API response body.
///
/// Slack reports failures in-band: `{"ok": false, "error": "<code>"}`. Those
/// are mapped with [`SlackdumpError::from_api_code`]. A body that is not JSON
/// at all is a network error; JSON that does not fit `T` is a malformed
/// response.
pub fn decode<T: DeserializeOwned>(method: &str, body: &str) -> Result<T, SlackdumpError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| SlackdumpError::network(method.to_string(), e))?;

    if !is_ok(&value) {
        let code = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        return Err(SlackdumpError::from_api_code(code));
    }

    serde_json::from_value(value).map_err(|e| SlackdumpError::malformed(method, e.to_string()))
}

/// Returns `true` if the body carries `"ok": true`.
pub fn is_ok(value: &Value) -> bool {
    value.get("ok").and_then(Value::as_bool).unwrap_or(false)
}
