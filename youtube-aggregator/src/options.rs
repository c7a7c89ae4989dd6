//! Per-traversal configuration.

use crate::cancel::CancelToken;
use crate::progress::Progress;
use std::fmt;

/// Upper bound on the number of pages one traversal may fetch before giving up.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// How reply expansion contributes to progress counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplyProgress {
    /// Only top-level items are counted; reply pages do not trigger reports.
    #[default]
    TopLevel,
    /// Inline and expanded replies are added to the same running total. A reply page that adds
    /// replies triggers a report, and no count is reported twice in a row.
    Cumulative,
}

/// Optional collaborators and limits for one traversal.
///
/// ```rust
/// use youtube_aggregator::{ReplyProgress, TraverseOptions, cancellation};
///
/// let (_handle, token) = cancellation();
/// let sink = |count: usize| eprintln!("{count}");
/// let options = TraverseOptions::default()
///     .progress(&sink)
///     .cancel(&token)
///     .reply_progress(ReplyProgress::Cumulative);
/// assert!(!options.is_cancelled());
/// ```
#[derive(Clone, Copy)]
pub struct TraverseOptions<'a> {
    pub(crate) progress: Option<&'a dyn Progress>,
    pub(crate) cancel: Option<&'a CancelToken>,
    pub(crate) max_pages: usize,
    pub(crate) reply_progress: ReplyProgress,
}

impl Default for TraverseOptions<'_> {
    fn default() -> Self {
        Self {
            progress: None,
            cancel: None,
            max_pages: DEFAULT_MAX_PAGES,
            reply_progress: ReplyProgress::default(),
        }
    }
}

impl fmt::Debug for TraverseOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraverseOptions")
            .field("progress", &self.progress.is_some())
            .field("cancel", &self.cancel)
            .field("max_pages", &self.max_pages)
            .field("reply_progress", &self.reply_progress)
            .finish()
    }
}

impl<'a> TraverseOptions<'a> {
    /// Reports the running item count to `sink` after every page.
    pub fn progress(mut self, sink: &'a dyn Progress) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Aborts the traversal with [`Error::Cancelled`](crate::Error::Cancelled) once `token` is
    /// cancelled. Checked before every page fetch.
    pub fn cancel(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Caps the number of pages fetched per traversal. Reply expansion of each comment counts
    /// separately against the same cap. Id lookups are not capped, since their batch count is
    /// fixed by the ids given.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn reply_progress(mut self, reply_progress: ReplyProgress) -> Self {
        self.reply_progress = reply_progress;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }
}
