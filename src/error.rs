//! Unified error types for slackdump.
//!
//! This module provides a single [`SlackdumpError`] enum that covers every
//! failure the library and the CLI can hit. Each variant belongs to one
//! [`ErrorKind`], which the CLI uses to pick a message and an exit code.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for slackdump operations.
///
/// # Example
///
/// ```rust
/// use slackdump::error::Result;
/// use slackdump::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SlackdumpError>;

/// Broad classification of a [`SlackdumpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller-supplied input: token, channel, pattern, date, format.
    Configuration,
    /// Transport-level failure talking to Slack.
    Network,
    /// Well-formed failure response from Slack that is not otherwise classified.
    Api,
    /// File write failure other than a permission problem.
    Io,
    /// File write denied.
    Permission,
    /// Interrupted by the user.
    Cancelled,
}

/// The error type for all slackdump operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlackdumpError {
    /// The token does not look like a Slack bot token.
    #[error("Invalid token format. Slack bot tokens should start with '{expected_prefix}'")]
    InvalidToken {
        /// Required token prefix
        expected_prefix: &'static str,
    },

    /// Slack rejected the token (`auth.test` failed or `invalid_auth`).
    #[error("Invalid authentication. Please check your token.")]
    InvalidAuth,

    /// The channel ID does not look like a Slack channel ID.
    #[error("Invalid channel format '{channel}'. Channel IDs should start with 'C'")]
    InvalidChannel {
        /// The channel ID that was provided
        channel: String,
    },

    /// Slack answered `channel_not_found`.
    #[error("Channel not found. Please check the channel ID format (C...)")]
    ChannelNotFound,

    /// The regular expression did not compile.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern that was provided
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A date string matched none of the accepted formats.
    #[error("Invalid date format: {input}. Supported formats: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Time-range lower bound is after the upper bound.
    #[error("start time {start} must be before end time {end}")]
    InvalidTimeRange {
        /// Lower bound as given
        start: String,
        /// Upper bound as given
        end: String,
    },

    /// Author filter built from an empty list.
    #[error("user_ids cannot be empty")]
    EmptyAuthorSet,

    /// Output format not supported (or compiled out).
    #[error("Unsupported format: {0}. Use 'json' or 'csv'")]
    UnsupportedFormat(String),

    /// Transport failure: timeout, DNS, connection reset, unexpected status,
    /// non-JSON body.
    #[error("Network error: {context}: {source}")]
    Network {
        /// What was being attempted
        context: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Slack returned `ok: false` with an unclassified error code.
    #[error("Slack API error: {code}")]
    Api {
        /// The raw Slack error code
        code: String,
    },

    /// The rate-limit retry cap was reached.
    #[error("Rate limit retries exhausted for {method} after {attempts} attempts")]
    RateLimitExhausted {
        /// API method being called
        method: String,
        /// Number of rate-limited responses received
        attempts: u32,
    },

    /// Slack answered with JSON that does not fit the expected shape.
    #[error("Malformed response from {method}: {message}")]
    MalformedResponse {
        /// API method being called
        method: String,
        /// What was wrong
        message: String,
    },

    /// An I/O error occurred while writing output.
    #[error("Error writing file: {0}")]
    Io(#[from] io::Error),

    /// Writing the output file was denied.
    #[error("Permission denied writing to {}. Please check file permissions.", path.display())]
    PermissionDenied {
        /// The output path
        path: PathBuf,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The user interrupted the run.
    #[error("Operation cancelled by user")]
    Cancelled,
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SlackdumpError {
    /// Creates an invalid token error for the bot token prefix.
    pub fn invalid_token() -> Self {
        SlackdumpError::InvalidToken {
            expected_prefix: crate::client::TOKEN_PREFIX,
        }
    }

    /// Creates an invalid channel error.
    pub fn invalid_channel(channel: impl Into<String>) -> Self {
        SlackdumpError::InvalidChannel {
            channel: channel.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        SlackdumpError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD, YYYY-MM-DD HH:MM:SS, YYYY-MM-DDTHH:MM:SS, YYYY-MM-DD HH:MM",
        }
    }

    /// Creates a network error wrapping any transport error.
    pub fn network(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SlackdumpError::Network {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(method: impl Into<String>, message: impl Into<String>) -> Self {
        SlackdumpError::MalformedResponse {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Maps a Slack `error` code from an `ok: false` body.
    pub fn from_api_code(code: &str) -> Self {
        match code {
            "channel_not_found" => SlackdumpError::ChannelNotFound,
            "invalid_auth" => SlackdumpError::InvalidAuth,
            other => SlackdumpError::Api {
                code: other.to_string(),
            },
        }
    }

    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SlackdumpError::InvalidToken { .. }
            | SlackdumpError::InvalidAuth
            | SlackdumpError::InvalidChannel { .. }
            | SlackdumpError::ChannelNotFound
            | SlackdumpError::InvalidPattern { .. }
            | SlackdumpError::InvalidDate { .. }
            | SlackdumpError::InvalidTimeRange { .. }
            | SlackdumpError::EmptyAuthorSet
            | SlackdumpError::UnsupportedFormat(_) => ErrorKind::Configuration,
            SlackdumpError::Network { .. } => ErrorKind::Network,
            SlackdumpError::Api { .. }
            | SlackdumpError::RateLimitExhausted { .. }
            | SlackdumpError::MalformedResponse { .. } => ErrorKind::Api,
            SlackdumpError::Io(_) | SlackdumpError::Json(_) => ErrorKind::Io,
            #[cfg(feature = "csv-output")]
            SlackdumpError::Csv(_) => ErrorKind::Io,
            SlackdumpError::PermissionDenied { .. } => ErrorKind::Permission,
            SlackdumpError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Returns `true` if this is a network error.
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// Returns `true` if this is an API error.
    pub fn is_api(&self) -> bool {
        self.kind() == ErrorKind::Api
    }

    /// Returns `true` if writing was denied.
    pub fn is_permission(&self) -> bool {
        self.kind() == ErrorKind::Permission
    }

    /// Returns `true` if the user interrupted the run.
    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }
}

// ============================================================================
// Tests
// ============================================================================
