//! YouTube Comments and CommentThreads API types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A comment on a video.
///
/// Top-level comments have no `parent_id` and collect their replies in `replies`. Replies are
/// flat: YouTube does not nest replies to replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// The ID that YouTube uses to uniquely identify the comment.
    pub id: String,
    /// Display name of the author.
    pub author: String,
    pub text: String,
    pub published_at: Option<Timestamp>,
    /// Present only if the comment was edited.
    pub updated_at: Option<Timestamp>,
    pub like_count: u64,
    pub parent_id: Option<String>,
    /// The number of replies YouTube reports for this comment, which may exceed the number of
    /// replies inlined in a comment thread page.
    pub total_reply_count: u32,
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Whether the remote reports more replies than this comment currently holds.
    pub fn missing_replies(&self) -> bool {
        self.total_reply_count as usize > self.replies.len()
    }
}

/// A `commentThread` resource: a top-level comment plus some of its replies.
///
/// See: <https://developers.google.com/youtube/v3/docs/commentThreads#resource>
#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadResource {
    pub(crate) snippet: CommentThreadSnippet,
    pub(crate) replies: Option<CommentThreadReplies>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub(crate) top_level_comment: CommentResource,
    #[serde(rename = "totalReplyCount", default)]
    pub(crate) total_reply_count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadReplies {
    #[serde(default)]
    pub(crate) comments: Vec<CommentResource>,
}

/// A `comment` resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/comments#resource>
#[derive(Debug, Deserialize)]
pub(crate) struct CommentResource {
    pub(crate) id: String,
    pub(crate) snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentSnippet {
    #[serde(rename = "authorDisplayName", default)]
    pub(crate) author_display_name: String,
    #[serde(rename = "textOriginal")]
    pub(crate) text_original: Option<String>,
    #[serde(rename = "textDisplay", default)]
    pub(crate) text_display: String,
    #[serde(rename = "parentId")]
    pub(crate) parent_id: Option<String>,
    #[serde(rename = "likeCount", default)]
    pub(crate) like_count: u64,
    #[serde(rename = "publishedAt")]
    pub(crate) published_at: Option<Timestamp>,
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: Option<Timestamp>,
}

impl From<CommentResource> for Comment {
    fn from(resource: CommentResource) -> Self {
        let snippet = resource.snippet;
        // updatedAt equals publishedAt for comments that were never edited
        let updated_at = snippet
            .updated_at
            .filter(|updated| Some(*updated) != snippet.published_at);
        Self {
            id: resource.id,
            author: snippet.author_display_name,
            text: snippet
                .text_original
                .filter(|text| !text.is_empty())
                .unwrap_or(snippet.text_display),
            published_at: snippet.published_at,
            updated_at,
            like_count: snippet.like_count,
            parent_id: snippet.parent_id,
            total_reply_count: 0,
            replies: Vec::new(),
        }
    }
}

impl From<CommentThreadResource> for Comment {
    fn from(thread: CommentThreadResource) -> Self {
        let mut comment = Comment::from(thread.snippet.top_level_comment);
        comment.total_reply_count = thread.snippet.total_reply_count;
        comment.replies = thread
            .replies
            .map(|replies| replies.comments.into_iter().map(Comment::from).collect())
            .unwrap_or_default();
        comment
    }
}
