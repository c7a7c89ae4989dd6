//! Exhaustive traversals over a [`PageFetcher`].
//!
//! Each operation drives the fetcher page by page until the API stops handing out continuation
//! tokens, and returns everything it fetched in arrival order. Comment traversals additionally
//! expand every top-level comment whose reply count exceeds what the thread page inlined, by
//! running a nested pagination over that comment's replies.
//!
//! All operations abort on the first failure (including a failed reply expansion) and on
//! cancellation; nothing fetched up to that point is returned.

use crate::error::{Error, Result};
use crate::fetch::{PageFetcher, VIDEO_BATCH_SIZE};
use crate::options::{ReplyProgress, TraverseOptions};
use crate::pager::Pager;
use crate::progress::Tally;
use crate::youtube_api::{Comment, Page, ResourceKind, Video};
use std::collections::HashSet;
use std::future::Future;
use tracing::instrument;

/// Aggregates paginated YouTube resources through a [`PageFetcher`].
///
/// The aggregator holds no state between calls, so one instance can serve any number of
/// concurrent traversals.
#[derive(Debug, Clone)]
pub struct Aggregator<F> {
    fetcher: F,
}

impl<F: PageFetcher> Aggregator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns every top-level comment on a video, each with its complete reply list.
    ///
    /// Progress counts top-level comments unless the options ask for
    /// [`ReplyProgress::Cumulative`].
    #[instrument(skip(self, options))]
    pub async fn comments(
        &self,
        video_id: &str,
        options: &TraverseOptions<'_>,
    ) -> Result<Vec<Comment>> {
        let mut pager = Pager::new(ResourceKind::CommentThreads, video_id, options);
        let mut tally = Tally::new(options.progress);
        let mut comments: Vec<Comment> = Vec::new();

        while let Some(page) = pager
            .next_page(|token| self.fetcher.comment_threads(video_id, token))
            .await?
        {
            let first_new = comments.len();
            comments.extend(page);

            for comment in &mut comments[first_new..] {
                let inline = std::mem::take(&mut comment.replies);
                for reply in inline {
                    adopt(comment, reply)?;
                }

                tally.add(match options.reply_progress {
                    ReplyProgress::TopLevel => 1,
                    ReplyProgress::Cumulative => 1 + comment.replies.len(),
                });

                if comment.missing_replies() {
                    self.expand_replies(comment, options, &mut tally).await?;
                }
            }
            match options.reply_progress {
                ReplyProgress::TopLevel => tally.report(),
                // reply pages of this thread page may already have reported the count
                ReplyProgress::Cumulative => tally.report_if_advanced(),
            }
        }

        tracing::debug!(
            pages = pager.pages(),
            comments = comments.len(),
            total = tally.count(),
            "collected comments"
        );
        Ok(comments)
    }

    /// Fetches the replies of `parent` that its thread page did not inline.
    ///
    /// Replies already present (the API repeats inlined replies in the full listing) are
    /// skipped, so every reply appears once, inline replies first.
    #[instrument(skip(self, parent, options, tally), fields(comment_id = %parent.id, total = parent.total_reply_count))]
    async fn expand_replies(
        &self,
        parent: &mut Comment,
        options: &TraverseOptions<'_>,
        tally: &mut Tally<'_>,
    ) -> Result<()> {
        let inline: HashSet<String> = parent.replies.iter().map(|reply| reply.id.clone()).collect();
        let mut pager = Pager::new(ResourceKind::CommentReplies, parent.id.as_str(), options);

        while let Some(page) = pager
            .next_page(|token| self.fetcher.comment_replies(&parent.id, token))
            .await?
        {
            let mut added = 0;
            for reply in page {
                if inline.contains(&reply.id) {
                    continue;
                }
                adopt(parent, reply)?;
                added += 1;
            }

            if options.reply_progress == ReplyProgress::Cumulative {
                tally.add(added);
                tally.report_if_advanced();
            }
        }

        if parent.replies.len() != parent.total_reply_count as usize {
            // the reported count is a cached estimate and lags behind deletions and new replies
            tracing::debug!(
                collected = parent.replies.len(),
                "reply count differs from reported total"
            );
        }
        Ok(())
    }

    /// Returns every video in a playlist, in playlist order.
    #[instrument(skip(self, options))]
    pub async fn playlist_videos(
        &self,
        playlist_id: &str,
        options: &TraverseOptions<'_>,
    ) -> Result<Vec<Video>> {
        self.collect(ResourceKind::PlaylistItems, playlist_id, options, |token| {
            self.fetcher.playlist_videos(playlist_id, token)
        })
        .await
    }

    /// Returns every video a channel has uploaded, by traversing its uploads playlist.
    #[instrument(skip(self, options))]
    pub async fn channel_uploads(
        &self,
        channel_id: &str,
        options: &TraverseOptions<'_>,
    ) -> Result<Vec<Video>> {
        if options.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let uploads = self
            .fetcher
            .uploads_playlist_id(channel_id)
            .await
            .map_err(|source| Error::FetchFailed {
                kind: ResourceKind::Channels,
                id: channel_id.to_string(),
                source,
            })?
            .ok_or_else(|| Error::NotFound {
                what: "uploads playlist of channel",
                name: channel_id.to_string(),
            })?;
        tracing::trace!(uploads, "resolved uploads playlist");

        self.collect(ResourceKind::ChannelUploads, &uploads, options, |token| {
            self.fetcher.playlist_videos(&uploads, token)
        })
        .await
    }

    /// Looks up videos by id, [`VIDEO_BATCH_SIZE`] at a time.
    ///
    /// Results follow the order of `ids`. Ids the API does not know are left out rather than
    /// treated as an error.
    #[instrument(skip(self, ids, options), fields(count = ids.len()))]
    pub async fn videos<S: AsRef<str>>(
        &self,
        ids: &[S],
        options: &TraverseOptions<'_>,
    ) -> Result<Vec<Video>> {
        let ids: Vec<String> = ids.iter().map(|id| id.as_ref().to_string()).collect();
        let batches: Vec<&[String]> = ids.chunks(VIDEO_BATCH_SIZE).collect();
        let label = format!("{} ids", ids.len());
        // the batch count is known up front, so the page cap does not apply
        let options = options.max_pages(batches.len().max(1));

        // the continuation token is the index of the next batch
        self.collect(ResourceKind::Videos, label, &options, |token| {
            let index = token.and_then(|t| t.parse::<usize>().ok()).unwrap_or(0);
            let batch = batches.get(index).copied().unwrap_or_default();
            let next = (index + 1 < batches.len()).then(|| (index + 1).to_string());
            async move {
                let items = if batch.is_empty() {
                    Vec::new()
                } else {
                    self.fetcher.videos(batch).await?
                };
                Ok::<_, eyre::Report>(Page {
                    items,
                    next_page_token: next,
                })
            }
        })
        .await
    }

    /// Looks up a single video.
    #[instrument(skip(self))]
    pub async fn video(&self, video_id: &str) -> Result<Video> {
        let ids = [video_id.to_string()];
        self.fetcher
            .videos(&ids)
            .await
            .map_err(|source| Error::FetchFailed {
                kind: ResourceKind::Videos,
                id: video_id.to_string(),
                source,
            })?
            .into_iter()
            .find(|video| video.id == video_id)
            .ok_or_else(|| Error::NotFound {
                what: "video",
                name: video_id.to_string(),
            })
    }

    /// Resolves a channel handle (`@name`) or legacy username to a channel id.
    #[instrument(skip(self))]
    pub async fn channel_id(&self, channel_name: &str) -> Result<String> {
        self.fetcher
            .channel_id(channel_name)
            .await
            .map_err(|source| Error::FetchFailed {
                kind: ResourceKind::Channels,
                id: channel_name.to_string(),
                source,
            })?
            .ok_or_else(|| Error::NotFound {
                what: "channel",
                name: channel_name.to_string(),
            })
    }

    /// Resolves a playlist of the given channel by name.
    #[instrument(skip(self))]
    pub async fn playlist_id(&self, channel_id: &str, playlist_name: &str) -> Result<String> {
        self.fetcher
            .playlist_id(channel_id, playlist_name)
            .await
            .map_err(|source| Error::FetchFailed {
                kind: ResourceKind::Playlists,
                id: channel_id.to_string(),
                source,
            })?
            .ok_or_else(|| Error::NotFound {
                what: "playlist",
                name: format!("{playlist_name} (channel {channel_id})"),
            })
    }

    async fn collect<T, Fetch, Fut>(
        &self,
        kind: ResourceKind,
        id: impl Into<String>,
        options: &TraverseOptions<'_>,
        mut fetch: Fetch,
    ) -> Result<Vec<T>>
    where
        Fetch: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = eyre::Result<Page<T>>>,
    {
        let mut pager = Pager::new(kind, id, options);
        let mut tally = Tally::new(options.progress);
        let mut items = Vec::new();

        while let Some(page) = pager.next_page(&mut fetch).await? {
            tally.add(page.len());
            items.extend(page);
            tally.report();
        }

        tracing::debug!(%kind, pages = pager.pages(), items = items.len(), "collected items");
        Ok(items)
    }
}

/// Moves `reply` into `parent`'s replies, filling in a missing parent reference.
fn adopt(parent: &mut Comment, mut reply: Comment) -> Result<()> {
    match &reply.parent_id {
        None => reply.parent_id = Some(parent.id.clone()),
        Some(claimed) if *claimed == parent.id => {}
        Some(claimed) => {
            return Err(Error::ParentMismatch {
                parent: parent.id.clone(),
                reply: reply.id,
                claimed: claimed.clone(),
            });
        }
    }
    parent.replies.push(reply);
    Ok(())
}
