//! Filter messages by time range, text pattern and author.
//!
//! Every filter implements [`MessageFilter`], a single `accept` predicate.
//! [`apply_filters`] runs a list of them over a message collection and keeps
//! only the messages every filter accepts.
//!
//! # Filter Types
//!
//! | Filter | Constructor | Accepts |
//! |--------|-------------|---------|
//! | [`TimeRangeFilter`] | [`new`](TimeRangeFilter::new) | Messages within inclusive bounds |
//! | [`PatternFilter`] | [`new`](PatternFilter::new) | Messages whose text contains a regex match |
//! | [`AuthorFilter`] | [`new`](AuthorFilter::new) | Messages from one of a set of users |
//!
//! # Examples
//!
//! ```
//! use slackdump::core::filter::{AuthorFilter, MessageFilter, PatternFilter, apply_filters};
//! use slackdump::Message;
//!
//! # fn main() -> slackdump::Result<()> {
//! let messages = vec![
//!     Message::new("U1", "ERROR: disk full", 1.0, "C1"),
//!     Message::new("U2", "error in build", 2.0, "C1"),
//!     Message::new("U1", "all good", 3.0, "C1"),
//! ];
//!
//! let filters: Vec<Box<dyn MessageFilter>> = vec![
//!     Box::new(PatternFilter::new("error", false)?),
//!     Box::new(AuthorFilter::new(["U1"])?),
//! ];
//!
//! let filtered = apply_filters(messages, &filters);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "ERROR: disk full");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Time bounds are inclusive and compared in local time
//! - Pattern matching is a search, not a full match
//! - Multiple filters are combined with AND logic

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use regex::{Regex, RegexBuilder};

use crate::Message;
use crate::error::SlackdumpError;

/// Date-time formats accepted by [`parse_datetime`], tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A predicate over a single message.
pub trait MessageFilter: fmt::Debug {
    /// Returns `true` if the message should be kept.
    fn accept(&self, message: &Message) -> bool;
}

/// Keeps messages whose local calendar time lies within optional inclusive
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRangeFilter {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl TimeRangeFilter {
    /// Creates a time-range filter.
    ///
    /// # Errors
    ///
    /// Returns [`SlackdumpError::InvalidTimeRange`] if `start` is after `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use slackdump::core::filter::{TimeRangeFilter, parse_datetime};
    ///
    /// # fn main() -> slackdump::Result<()> {
    /// let start = parse_datetime("2024-01-01")?;
    /// let end = parse_datetime("2024-12-31 23:59:59")?;
    /// let filter = TimeRangeFilter::new(Some(start), Some(end))?;
    ///
    /// assert!(TimeRangeFilter::new(Some(end), Some(start)).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Self, SlackdumpError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(SlackdumpError::InvalidTimeRange {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Lower bound, if any.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    /// Upper bound, if any.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }
}

impl MessageFilter for TimeRangeFilter {
    fn accept(&self, message: &Message) -> bool {
        let at = message.naive_datetime();
        if self.start.is_some_and(|start| at < start) {
            return false;
        }
        if self.end.is_some_and(|end| at > end) {
            return false;
        }
        true
    }
}

/// Keeps messages whose text contains a match for a regular expression.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    regex: Regex,
    case_sensitive: bool,
}

impl PatternFilter {
    /// Compiles `pattern`. Matching ignores case unless `case_sensitive` is set.
    ///
    /// The syntax is that of the [`regex`] crate, which has no lookaround
    /// and no backreferences. Patterns such as `(?<=deploy )done` or
    /// `(\w)\1` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SlackdumpError::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self, SlackdumpError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|source| SlackdumpError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            regex,
            case_sensitive,
        })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether matching is case-sensitive.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

impl MessageFilter for PatternFilter {
    fn accept(&self, message: &Message) -> bool {
        self.regex.is_match(&message.text)
    }
}

/// Keeps messages written by one of a set of user IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFilter {
    users: HashSet<String>,
}

impl AuthorFilter {
    /// Builds the filter from user IDs. Duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`SlackdumpError::EmptyAuthorSet`] if no IDs are given.
    pub fn new<I, S>(users: I) -> Result<Self, SlackdumpError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let users: HashSet<String> = users.into_iter().map(Into::into).collect();
        if users.is_empty() {
            return Err(SlackdumpError::EmptyAuthorSet);
        }
        Ok(Self { users })
    }

    /// Number of distinct user IDs.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Always `false`; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns `true` if the user ID is in the set.
    pub fn contains(&self, user: &str) -> bool {
        self.users.contains(user)
    }
}

impl MessageFilter for AuthorFilter {
    fn accept(&self, message: &Message) -> bool {
        self.users.contains(&message.user)
    }
}

/// Parses a CLI date string into a naive local date-time.
///
/// Accepted formats: `YYYY-MM-DD` (midnight), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`.
///
/// # Errors
///
/// Returns [`SlackdumpError::InvalidDate`] if no format matches or the values
/// are out of range.
///
/// # Examples
///
/// ```
/// use slackdump::core::filter::parse_datetime;
///
/// let dt = parse_datetime("2023-01-01 12:30").unwrap();
/// assert_eq!(dt.to_string(), "2023-01-01 12:30:00");
/// assert!(parse_datetime("2023-13-01").is_err());
/// ```
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, SlackdumpError> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| SlackdumpError::invalid_date(input))
}

/// Filters a collection of messages, keeping those every filter accepts.
///
/// Filters run in order, each over the survivors of the previous one. Order
/// is preserved; an empty filter list returns the input unchanged.
///
/// # Examples
///
/// ```
/// use slackdump::core::filter::{AuthorFilter, MessageFilter, apply_filters};
/// use slackdump::Message;
///
/// let messages = vec![
///     Message::new("U1", "a", 1.0, "C1"),
///     Message::new("U2", "b", 2.0, "C1"),
/// ];
/// let filters: Vec<Box<dyn MessageFilter>> = vec![Box::new(AuthorFilter::new(["U2"]).unwrap())];
///
/// let filtered = apply_filters(messages, &filters);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].user, "U2");
/// ```
pub fn apply_filters(messages: Vec<Message>, filters: &[Box<dyn MessageFilter>]) -> Vec<Message> {
    filters.iter().fold(messages, |remaining, filter| {
        remaining
            .into_iter()
            .filter(|msg| filter.accept(msg))
            .collect()
    })
}
