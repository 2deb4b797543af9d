//! Output format writers.
//!
//! [`export`] is the single entry point: it picks the writer for the
//! requested [`OutputFormat`], prepares the output directory and maps
//! file-system failures onto [`SlackdumpError`].
//!
//! - [`to_json`] - JSON array of message records - requires `json-output` feature
//! - [`to_csv`] - comma-delimited CSV with a fixed header - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> slackdump::Result<()> {
//! use slackdump::core::output::export;
//! use slackdump::format::OutputFormat;
//! use slackdump::Message;
//!
//! let messages = vec![Message::new("U1", "Hello!", 1_705_314_600.0, "C042")];
//!
//! export(&messages, "dumps/general.json", OutputFormat::Json)?;
//! export(&messages, "dumps/general.csv", OutputFormat::Csv)?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, to_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{JsonRecord, to_json};

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::Message;
use crate::error::SlackdumpError;
use crate::format::OutputFormat;

/// Writes `messages` to `path` in `format`.
///
/// Returns the number of messages written. An empty slice is a no-op: no
/// directory or file is created and `Ok(0)` is returned.
///
/// Missing parent directories are created on a best-effort basis; only
/// failing to create or write the file itself is an error.
///
/// # Errors
///
/// - [`SlackdumpError::PermissionDenied`] if the file cannot be opened for
///   lack of permission
/// - [`SlackdumpError::Io`], [`SlackdumpError::Csv`], [`SlackdumpError::Json`]
///   for other write failures
/// - [`SlackdumpError::UnsupportedFormat`] if the format's writer is not
///   compiled in
pub fn export(
    messages: &[Message],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<usize, SlackdumpError> {
    let path = path.as_ref();

    if messages.is_empty() {
        info!("No messages to export");
        return Ok(0);
    }

    let write: fn(&[Message], File) -> Result<(), SlackdumpError> = match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => json_writer::write_json,
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => csv_writer::write_csv,
        #[allow(unreachable_patterns)]
        other => {
            return Err(SlackdumpError::UnsupportedFormat(
                other.extension().to_string(),
            ));
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            debug!("Could not create {}: {}", parent.display(), e);
        }
    }

    let file = File::create(path).map_err(|e| open_error(path, e))?;
    write(messages, file)?;

    info!("Exported {} messages to {}", messages.len(), path.display());
    Ok(messages.len())
}

fn open_error(path: &Path, err: io::Error) -> SlackdumpError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        SlackdumpError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        SlackdumpError::Io(err)
    }
}
