//! Slack message value type.
//!
//! [`Message`] is what the client produces for every record returned by
//! `conversations.history`, what the filters inspect, and what the exporters
//! write out.
//!
//! # Examples
//!
//! ```
//! use slackdump::Message;
//!
//! let msg = Message::new("U123", "Deploy finished", 1_700_000_000.5, "C042")
//!     .with_thread_ts("1699999999.000100")
//!     .with_reply_count(3);
//!
//! assert_eq!(msg.user, "U123");
//! assert_eq!(msg.reply_count, 3);
//! assert!(msg.is_thread_reply_or_parent());
//! ```

use chrono::{DateTime, Local, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single Slack message from one channel.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `text` | `String` | Message text, may be empty |
/// | `user` | `String` | Author user ID (empty for some bot messages) |
/// | `timestamp` | `f64` | Slack `ts` as seconds since epoch |
/// | `channel` | `String` | Channel the message was fetched from |
/// | `thread_ts` | `Option<String>` | Thread parent timestamp |
/// | `reply_count` | `u64` | Number of thread replies |
/// | `reactions` | `Vec<Value>` | Raw reaction objects, passed through untouched |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message text.
    pub text: String,

    /// Author user ID.
    pub user: String,

    /// Slack timestamp in seconds since the Unix epoch.
    pub timestamp: f64,

    /// Channel ID.
    pub channel: String,

    /// Timestamp of the thread parent, if the message belongs to a thread.
    #[serde(default)]
    pub thread_ts: Option<String>,

    /// Number of replies in the thread started by this message.
    #[serde(default)]
    pub reply_count: u64,

    /// Reaction records as Slack sent them.
    #[serde(default)]
    pub reactions: Vec<Value>,
}

impl Message {
    /// Creates a message with no thread, replies or reactions.
    pub fn new(
        user: impl Into<String>,
        text: impl Into<String>,
        timestamp: f64,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            user: user.into(),
            timestamp,
            channel: channel.into(),
            thread_ts: None,
            reply_count: 0,
            reactions: Vec::new(),
        }
    }

    /// Builder method to set the thread parent timestamp.
    #[must_use]
    pub fn with_thread_ts(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    /// Builder method to set the reply count.
    #[must_use]
    pub fn with_reply_count(mut self, reply_count: u64) -> Self {
        self.reply_count = reply_count;
        self
    }

    /// Builder method to set the reactions.
    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Value>) -> Self {
        self.reactions = reactions;
        self
    }

    /// Calendar time of the message in the local time zone.
    ///
    /// Sub-second precision is kept down to microseconds, which is all a
    /// Slack `ts` carries.
    pub fn datetime(&self) -> DateTime<Local> {
        let micros = (self.timestamp * 1_000_000.0).round() as i64;
        let secs = micros.div_euclid(1_000_000);
        let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;

        DateTime::<Utc>::from_timestamp(secs, nanos)
            .unwrap_or_default()
            .with_timezone(&Local)
    }

    /// Local calendar time without offset, as the filters compare it.
    pub fn naive_datetime(&self) -> NaiveDateTime {
        self.datetime().naive_local()
    }

    /// ISO-8601 rendering of [`datetime`](Self::datetime), e.g.
    /// `2024-01-15T10:30:00` or `2024-01-15T10:30:00.123456`.
    ///
    /// The fraction is always six digits when present.
    pub fn datetime_iso(&self) -> String {
        let dt = self.naive_datetime();
        let fmt = if dt.nanosecond() == 0 {
            "%Y-%m-%dT%H:%M:%S"
        } else {
            "%Y-%m-%dT%H:%M:%S%.6f"
        };
        dt.format(fmt).to_string()
    }

    /// Returns `true` if the message is a thread parent or a thread reply.
    pub fn is_thread_reply_or_parent(&self) -> bool {
        self.thread_ts.is_some()
    }
}
