//! CSV output writer.

use std::fs::File;

use crate::Message;
use crate::error::SlackdumpError;

/// Fixed CSV header.
pub const CSV_HEADER: [&str; 6] = [
    "datetime",
    "user",
    "text",
    "channel",
    "thread_ts",
    "reply_count",
];

/// Writes messages as comma-delimited CSV.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `datetime`, `user`, `text`, `channel`, `thread_ts`, `reply_count`
/// - `thread_ts` is empty when the message is not in a thread
/// - Encoding: UTF-8
pub(crate) fn write_csv(messages: &[Message], file: File) -> Result<(), SlackdumpError> {
    let mut writer = csv::Writer::from_writer(file);
    write_records(&mut writer, messages)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to the same CSV text [`export`](super::export) writes.
pub fn to_csv(messages: &[Message]) -> Result<String, SlackdumpError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_records(&mut writer, messages)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| SlackdumpError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| SlackdumpError::Io(std::io::Error::other(e)))
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    messages: &[Message],
) -> Result<(), SlackdumpError> {
    writer.write_record(CSV_HEADER)?;
    for msg in messages {
        writer.write_record(build_record(msg))?;
    }
    Ok(())
}

/// Build CSV record for a single message.
fn build_record(msg: &Message) -> [String; 6] {
    [
        msg.datetime_iso(),
        msg.user.clone(),
        msg.text.clone(),
        msg.channel.clone(),
        msg.thread_ts.clone().unwrap_or_default(),
        msg.reply_count.to_string(),
    ]
}
