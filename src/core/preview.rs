//! Terminal preview of fetched messages.

use std::fmt::Write;

use crate::Message;

/// Number of messages shown in a preview.
pub const PREVIEW_COUNT: usize = 10;

/// Characters of message text shown per line.
pub const PREVIEW_TEXT_CHARS: usize = 100;

/// Renders the first [`PREVIEW_COUNT`] messages, one per line.
///
/// `total` is the size of the full result set; when it exceeds the preview
/// a hint about `--output` is appended.
///
/// # Examples
///
/// ```
/// use slackdump::core::preview::render_preview;
/// use slackdump::Message;
///
/// let messages = vec![Message::new("U1", "hello", 0.0, "C1")];
/// let out = render_preview(&messages, 1);
/// assert!(out.contains("Showing first 10 of 1 messages"));
/// assert!(out.contains("U1: hello"));
/// ```
pub fn render_preview(messages: &[Message], total: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📋 Showing first {PREVIEW_COUNT} of {total} messages:\n");

    for (i, msg) in messages.iter().take(PREVIEW_COUNT).enumerate() {
        let when: String = msg.datetime_iso().chars().take(19).collect();
        let text: String = msg.text.chars().take(PREVIEW_TEXT_CHARS).collect();
        let _ = writeln!(out, "{:2}. [{}] {}: {}", i + 1, when, msg.user, text);
        if msg.text.chars().count() > PREVIEW_TEXT_CHARS {
            let _ = writeln!(out, "    ...");
        }
    }

    if total > PREVIEW_COUNT {
        let _ = writeln!(out, "\n💡 Use --output to save all {total} messages to a file");
    }

    out
}
