//! Rate-limit waits and cancellation.
//!
//! The client never sleeps directly; it goes through a [`Sleeper`] so tests
//! can record waits instead of blocking, and so a [`CancelToken`] can cut a
//! long `Retry-After` wait short.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::SlackdumpError;

/// Granularity at which [`ThreadSleeper`] re-checks the cancel flag.
const SLEEP_SLICE: Duration = Duration::from_millis(250);

/// Shared flag that aborts the current fetch when set.
///
/// Cloning shares the flag, so a signal handler can hold one clone while the
/// client holds another.
///
/// # Example
///
/// ```rust
/// use slackdump::client::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(token.check().is_ok());
///
/// handle.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check().unwrap_err().is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns [`SlackdumpError::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> Result<(), SlackdumpError> {
        if self.is_cancelled() {
            Err(SlackdumpError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Blocks the caller during a rate-limit wait.
pub trait Sleeper {
    /// Waits for `duration`, returning early with
    /// [`SlackdumpError::Cancelled`] if `cancel` fires.
    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> Result<(), SlackdumpError>;
}

/// [`Sleeper`] backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration, cancel: &CancelToken) -> Result<(), SlackdumpError> {
        let deadline = Instant::now() + duration;
        loop {
            cancel.check()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}

/// Parses a `Retry-After` header value in seconds.
///
/// Integers are taken as-is, decimals are truncated, anything else yields
/// `None` so the caller falls back to its default.
pub fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let whole = value.split_once('.').map(|(whole, _)| whole).unwrap_or(value);
    whole.parse::<u64>().ok().map(Duration::from_secs)
}
