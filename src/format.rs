//! Output format types for the slackdump library.
//!
//! These types carry no CLI framework dependency, so library users can pick
//! a format from a string.
//!
//! # Example
//!
//! ```rust
//! use slackdump::format::OutputFormat;
//!
//! let format: OutputFormat = "csv".parse().unwrap();
//! assert_eq!(format.extension(), "csv");
//! ```

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::SlackdumpError;

/// Export format.
///
/// - [`Json`](OutputFormat::Json) - Array of full message records (default)
/// - [`Csv`](OutputFormat::Csv) - Six fixed columns, one row per message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON array of messages, every field included.
    #[default]
    Json,

    /// Comma-separated values with the header
    /// `datetime,user,text,channel,thread_ts,reply_count`.
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = SlackdumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(SlackdumpError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Converts messages to a string in the specified format.
///
/// Same content [`export`](crate::core::output::export) writes to disk.
///
/// # Errors
///
/// Returns [`SlackdumpError::UnsupportedFormat`] if the format's writer is
/// not compiled in.
#[allow(unused_variables)]
pub fn to_format_string(messages: &[Message], format: OutputFormat) -> Result<String, SlackdumpError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages),
        #[allow(unreachable_patterns)]
        _ => Err(SlackdumpError::UnsupportedFormat(
            format.extension().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);

        let err = OutputFormat::from_str("xml").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_format_default_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Csv).unwrap();
        assert_eq!(json, "\"csv\"");
        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
    }

    #[test]
    fn test_to_format_string_dispatch() {
        let messages = vec![Message::new("U1", "hi", 1.0, "C1")];
        let csv = to_format_string(&messages, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("datetime,user,text"));
        let json = to_format_string(&messages, OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('['));
    }
}
