//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Message;
use crate::error::SlackdumpError;

/// One exported message, with the derived `datetime` alongside the raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub text: String,
    pub user: String,
    pub timestamp: f64,
    pub datetime: String,
    pub channel: String,
    pub thread_ts: Option<String>,
    pub reply_count: u64,
    pub reactions: Vec<Value>,
}

impl JsonRecord {
    fn from_message(msg: &Message) -> Self {
        Self {
            text: msg.text.clone(),
            user: msg.user.clone(),
            timestamp: msg.timestamp,
            datetime: msg.datetime_iso(),
            channel: msg.channel.clone(),
            thread_ts: msg.thread_ts.clone(),
            reply_count: msg.reply_count,
            reactions: msg.reactions.clone(),
        }
    }
}

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {
///     "text": "Hello",
///     "user": "U123",
///     "timestamp": 1705314600.0,
///     "datetime": "2024-01-15T10:30:00",
///     "channel": "C042",
///     "thread_ts": null,
///     "reply_count": 0,
///     "reactions": []
///   }
/// ]
/// ```
pub(crate) fn write_json(messages: &[Message], file: File) -> Result<(), SlackdumpError> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records(messages))?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to the same JSON text [`export`](super::export) writes.
pub fn to_json(messages: &[Message]) -> Result<String, SlackdumpError> {
    Ok(serde_json::to_string_pretty(&records(messages))?)
}

fn records(messages: &[Message]) -> Vec<JsonRecord> {
    messages.iter().map(JsonRecord::from_message).collect()
}
