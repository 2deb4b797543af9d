//! Cursor pagination over `conversations.history`.
//!
//! A fetch is driven as an explicit state machine:
//!
//! ```text
//! FetchingPage{cursor} --429--> RateLimited{cursor, wait} --wait--> FetchingPage{cursor}
//! FetchingPage{cursor} --page--> PageReceived{next_cursor}
//! PageReceived{Some(cursor)} --> FetchingPage{cursor}
//! PageReceived{None} | limit reached --> Done
//! ```
//!
//! The network side is abstracted behind [`PageSource`], so the machine can be
//! stepped against canned pages in tests.

use std::mem;
use std::time::Duration;

use tracing::{info, warn};

use super::api::CONVERSATIONS_HISTORY;
use crate::Message;
use crate::config::RateLimitPolicy;
use crate::error::{Result, SlackdumpError};

/// Where a fetch currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// About to request the page at `cursor` (`None` for the first page).
    FetchingPage { cursor: Option<String> },
    /// Slack answered 429; `wait` must elapse before re-requesting `cursor`.
    RateLimited { cursor: Option<String>, wait: Duration },
    /// A page arrived; `next_cursor` is `None` on the last page.
    PageReceived { next_cursor: Option<String> },
    /// All requested messages have been collected.
    Done,
}

/// Parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum records to return.
    pub limit: usize,
    /// Continuation cursor from the previous page.
    pub cursor: Option<String>,
}

/// One decoded page.
#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub messages: Vec<Message>,
    pub next_cursor: Option<String>,
}

/// Result of asking a [`PageSource`] for a page.
#[derive(Debug, Clone)]
pub enum PageOutcome {
    Page(HistoryPage),
    /// Rate limited; retry the same request after the given wait.
    RateLimited(Duration),
}

/// Supplies pages and performs rate-limit waits.
pub trait PageSource {
    /// Requests one page.
    fn fetch_page(&mut self, request: &PageRequest) -> Result<PageOutcome>;

    /// Blocks for `duration`.
    fn wait(&mut self, duration: Duration) -> Result<()>;
}

/// Drives [`FetchState`] to completion, accumulating messages.
#[derive(Debug)]
pub struct Paginator {
    limit: Option<usize>,
    page_size: usize,
    policy: RateLimitPolicy,
    state: FetchState,
    messages: Vec<Message>,
    rate_limited: u32,
    pages: usize,
}

impl Paginator {
    /// Creates a paginator for at most `limit` messages (all when `None`).
    ///
    /// A limit of zero starts in [`FetchState::Done`].
    pub fn new(limit: Option<usize>, page_size: usize, policy: RateLimitPolicy) -> Self {
        let state = if limit == Some(0) {
            FetchState::Done
        } else {
            FetchState::FetchingPage { cursor: None }
        };

        Self {
            limit,
            page_size: page_size.max(1),
            policy,
            state,
            messages: Vec::new(),
            rate_limited: 0,
            pages: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Messages collected so far.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of pages received so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Records to ask for in the next request.
    fn next_page_limit(&self) -> usize {
        match self.limit {
            Some(limit) => self.page_size.min(limit.saturating_sub(self.messages.len())),
            None => self.page_size,
        }
    }

    /// Performs one transition. Returns `false` once the state is `Done`.
    ///
    /// # Errors
    ///
    /// Propagates errors from `source`, and fails with
    /// [`SlackdumpError::RateLimitExhausted`] when the policy's retry cap is
    /// exceeded.
    pub fn step<P: PageSource + ?Sized>(&mut self, source: &mut P) -> Result<bool> {
        let state = mem::replace(&mut self.state, FetchState::Done);

        self.state = match state {
            FetchState::Done => return Ok(false),

            FetchState::FetchingPage { cursor } => {
                info!(
                    fetched = self.messages.len(),
                    "📥 Fetching messages... ({} so far)",
                    self.messages.len()
                );
                let request = PageRequest {
                    limit: self.next_page_limit(),
                    cursor,
                };

                match source.fetch_page(&request)? {
                    PageOutcome::Page(page) => {
                        self.rate_limited = 0;
                        self.pages += 1;
                        self.messages.extend(page.messages);
                        self.on_page(page.next_cursor)
                    }
                    PageOutcome::RateLimited(wait) => {
                        self.rate_limited += 1;
                        if !self.policy.allows_retry(self.rate_limited) {
                            return Err(SlackdumpError::RateLimitExhausted {
                                method: CONVERSATIONS_HISTORY.to_string(),
                                attempts: self.rate_limited,
                            });
                        }
                        FetchState::RateLimited {
                            cursor: request.cursor,
                            wait,
                        }
                    }
                }
            }

            FetchState::RateLimited { cursor, wait } => {
                warn!(
                    wait_secs = wait.as_secs(),
                    "⏳ Rate limited. Waiting {} seconds...",
                    wait.as_secs()
                );
                source.wait(wait)?;
                FetchState::FetchingPage { cursor }
            }

            FetchState::PageReceived { next_cursor } => match next_cursor {
                Some(cursor) => FetchState::FetchingPage {
                    cursor: Some(cursor),
                },
                None => FetchState::Done,
            },
        };

        Ok(self.state != FetchState::Done)
    }

    fn on_page(&mut self, next_cursor: Option<String>) -> FetchState {
        if let Some(limit) = self.limit {
            if self.messages.len() >= limit {
                self.messages.truncate(limit);
                return FetchState::Done;
            }
        }
        FetchState::PageReceived { next_cursor }
    }

    /// Steps until `Done` and returns the collected messages.
    pub fn run<P: PageSource + ?Sized>(mut self, source: &mut P) -> Result<Vec<Message>> {
        while self.step(source)? {}
        info!(
            count = self.messages.len(),
            pages = self.pages,
            "✅ Fetched {} messages",
            self.messages.len()
        );
        Ok(self.messages)
    }
}
