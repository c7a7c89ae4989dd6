//! Failure outcomes of an aggregation.
//!
//! Every variant aborts the traversal that produced it. Nothing collected before the failure is
//! handed back to the caller.

use crate::youtube_api::ResourceKind;
use thiserror::Error;

/// Error type for all aggregation operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The cancellation signal was observed before a pending fetch.
    #[error("traversal cancelled")]
    Cancelled,

    /// The page fetcher reported a transport or API-level error.
    #[error("failed to fetch {kind} page for {id}")]
    FetchFailed {
        kind: ResourceKind,
        id: String,
        #[source]
        source: eyre::Report,
    },

    /// The fetcher kept handing out continuation tokens past the configured page limit.
    #[error("{kind} traversal of {id} did not terminate within {limit} pages")]
    PaginationLimitExceeded {
        kind: ResourceKind,
        id: String,
        limit: usize,
    },

    /// A name or id lookup came back empty.
    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    /// A fetched reply names a different parent than the comment it was fetched for.
    #[error("reply {reply} claims parent {claimed} but was fetched for {parent}")]
    ParentMismatch {
        parent: String,
        reply: String,
        claimed: String,
    },
}

/// Result type alias for aggregation operations.
pub type Result<T> = std::result::Result<T, Error>;
