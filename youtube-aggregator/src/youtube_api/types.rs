//! Shared types for paginated YouTube API list endpoints.

use std::fmt;

/// One page of a list endpoint.
///
/// Items keep the order the API returned them in. A `next_page_token` of `None` marks the last
/// page. The token is opaque: it is only ever handed back to the fetcher that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// A terminal page.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }

    /// A page followed by at least one more.
    pub fn more(items: Vec<T>, next_page_token: impl Into<String>) -> Self {
        Self {
            items,
            next_page_token: Some(next_page_token.into()),
        }
    }
}

/// The kind of resource being paginated.
///
/// Displays as the name of the API list endpoint it corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Top-level comments of a video, with their inlined replies.
    CommentThreads,
    /// Replies to a single top-level comment.
    CommentReplies,
    /// Videos in a playlist.
    PlaylistItems,
    /// Videos in a channel's uploads playlist.
    ChannelUploads,
    /// Videos looked up by id.
    Videos,
    Channels,
    Playlists,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::CommentThreads => "commentThreads",
            ResourceKind::CommentReplies => "comments",
            ResourceKind::PlaylistItems => "playlistItems",
            ResourceKind::ChannelUploads => "uploads",
            ResourceKind::Videos => "videos",
            ResourceKind::Channels => "channels",
            ResourceKind::Playlists => "playlists",
        })
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}

/// Response envelope shared by every `*.list` endpoint.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub(crate) items: Vec<T>,
    #[serde(rename = "pageInfo", default)]
    pub(crate) page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub(crate) next_page_token: Option<String>,
}

impl<T> ListResponse<T> {
    /// The continuation token, treating an empty token as the end of the list.
    pub(crate) fn next_page_token(&mut self) -> Option<String> {
        self.next_page_token.take().filter(|token| !token.is_empty())
    }
}
