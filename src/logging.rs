//! Diagnostic logging setup for the binary.
//!
//! Library code only emits `tracing` events; this installs the subscriber
//! that prints them to stderr, keeping stdout for the preview and summary.

use tracing::Level;

/// Log verbosity chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only (`-q`).
    Quiet,
    /// Progress messages (default).
    #[default]
    Normal,
    /// Request-level detail (`-v`).
    Verbose,
}

impl Verbosity {
    /// Picks a verbosity from the `-q` / `-v` flags. `-q` wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Maximum `tracing` level to print.
    pub fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// Installs a plain-text subscriber on stderr.
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
