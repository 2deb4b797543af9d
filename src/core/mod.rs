//! Core processing logic for slackdump.
//!
//! This module contains:
//! - [`filter`] - Message filters and the filter pipeline
//! - [`output`] - Format writers (JSON, CSV) and [`export`]
//! - [`preview`] - Terminal preview of a result set
//!
//! # Quick Start
//!
//! ```rust
//! use slackdump::core::{
//!     Message, MessageFilter, PatternFilter, TimeRangeFilter, AuthorFilter,
//!     apply_filters, export, render_preview,
//! };
//! ```

pub mod filter;
pub mod output;
pub mod preview;

// Re-export main types for convenience
pub use filter::{
    AuthorFilter, MessageFilter, PatternFilter, TimeRangeFilter, apply_filters, parse_datetime,
};
pub use output::export;
pub use preview::render_preview;

// Re-export Message from the crate root
pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::to_csv;
#[cfg(feature = "json-output")]
pub use output::to_json;
