//! The "fetch pages until the token runs out" loop shared by every traversal.

use crate::error::{Error, Result};
use crate::options::TraverseOptions;
use crate::youtube_api::{Page, ResourceKind};
use std::future::Future;

/// Drives one paginated traversal, one page per [`Pager::next_page`] call.
///
/// Cancellation and the page limit are checked before every fetch, so no request is issued
/// after either trips.
pub(crate) struct Pager<'o, 'a> {
    kind: ResourceKind,
    id: String,
    options: &'o TraverseOptions<'a>,
    token: Option<String>,
    pages: usize,
    done: bool,
}

impl<'o, 'a> Pager<'o, 'a> {
    pub(crate) fn new(
        kind: ResourceKind,
        id: impl Into<String>,
        options: &'o TraverseOptions<'a>,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            options,
            token: None,
            pages: 0,
            done: false,
        }
    }

    /// Fetches the next page with `fetch`, which receives the continuation token (`None` for the
    /// first page).
    ///
    /// Returns `Ok(None)` once the previous page was terminal.
    pub(crate) async fn next_page<T, Fetch, Fut>(&mut self, fetch: Fetch) -> Result<Option<Vec<T>>>
    where
        Fetch: FnOnce(Option<String>) -> Fut,
        Fut: Future<Output = eyre::Result<Page<T>>>,
    {
        if self.done {
            return Ok(None);
        }
        if self.options.is_cancelled() {
            tracing::debug!(kind = %self.kind, id = self.id, pages = self.pages, "traversal cancelled");
            return Err(Error::Cancelled);
        }
        if self.pages >= self.options.max_pages {
            tracing::warn!(kind = %self.kind, id = self.id, limit = self.options.max_pages, "page limit reached");
            return Err(Error::PaginationLimitExceeded {
                kind: self.kind,
                id: self.id.clone(),
                limit: self.options.max_pages,
            });
        }

        let page = fetch(self.token.take())
            .await
            .map_err(|source| Error::FetchFailed {
                kind: self.kind,
                id: self.id.clone(),
                source,
            })?;
        self.pages += 1;

        tracing::debug!(
            kind = %self.kind,
            id = self.id,
            page = self.pages,
            returned_items = page.items.len(),
            has_more = page.next_page_token.is_some(),
            "fetched page"
        );

        match page.next_page_token {
            Some(token) => self.token = Some(token),
            None => self.done = true,
        }
        Ok(Some(page.items))
    }

    pub(crate) fn pages(&self) -> usize {
        self.pages
    }
}
