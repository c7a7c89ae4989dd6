//! The network seam between the aggregator and the YouTube API.

use crate::youtube_api::{Comment, Page, Video};
use std::future::Future;
use std::sync::Arc;

/// Maximum number of ids the `videos.list` endpoint accepts per request.
pub const VIDEO_BATCH_SIZE: usize = 50;

/// Performs single round trips against the remote API.
///
/// Implementations own transport, authentication and any retry policy. The aggregator drives
/// pagination on top of these calls and never inspects continuation tokens.
pub trait PageFetcher: Send + Sync {
    /// One page of top-level comments on a video, each carrying whatever replies the API
    /// inlined.
    fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<String>,
    ) -> impl Future<Output = eyre::Result<Page<Comment>>> + Send;

    /// One page of replies to a top-level comment.
    fn comment_replies(
        &self,
        parent_id: &str,
        page_token: Option<String>,
    ) -> impl Future<Output = eyre::Result<Page<Comment>>> + Send;

    /// One page of the videos in a playlist, in playlist order.
    fn playlist_videos(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> impl Future<Output = eyre::Result<Page<Video>>> + Send;

    /// Looks up at most [`VIDEO_BATCH_SIZE`] videos by id. Unknown ids are left out.
    fn videos(&self, ids: &[String]) -> impl Future<Output = eyre::Result<Vec<Video>>> + Send;

    /// The id of the playlist holding a channel's uploads, if the channel exists.
    fn uploads_playlist_id(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<Option<String>>> + Send;

    /// Resolves a channel name to its id.
    fn channel_id(
        &self,
        channel_name: &str,
    ) -> impl Future<Output = eyre::Result<Option<String>>> + Send;

    /// Finds a channel's playlist by name.
    fn playlist_id(
        &self,
        channel_id: &str,
        playlist_name: &str,
    ) -> impl Future<Output = eyre::Result<Option<String>>> + Send;
}

macro_rules! forward_page_fetcher {
    ($($ty:ty),*) => {$(
        impl<F: PageFetcher> PageFetcher for $ty {
            fn comment_threads(
                &self,
                video_id: &str,
                page_token: Option<String>,
            ) -> impl Future<Output = eyre::Result<Page<Comment>>> + Send {
                (**self).comment_threads(video_id, page_token)
            }

            fn comment_replies(
                &self,
                parent_id: &str,
                page_token: Option<String>,
            ) -> impl Future<Output = eyre::Result<Page<Comment>>> + Send {
                (**self).comment_replies(parent_id, page_token)
            }

            fn playlist_videos(
                &self,
                playlist_id: &str,
                page_token: Option<String>,
            ) -> impl Future<Output = eyre::Result<Page<Video>>> + Send {
                (**self).playlist_videos(playlist_id, page_token)
            }

            fn videos(
                &self,
                ids: &[String],
            ) -> impl Future<Output = eyre::Result<Vec<Video>>> + Send {
                (**self).videos(ids)
            }

            fn uploads_playlist_id(
                &self,
                channel_id: &str,
            ) -> impl Future<Output = eyre::Result<Option<String>>> + Send {
                (**self).uploads_playlist_id(channel_id)
            }

            fn channel_id(
                &self,
                channel_name: &str,
            ) -> impl Future<Output = eyre::Result<Option<String>>> + Send {
                (**self).channel_id(channel_name)
            }

            fn playlist_id(
                &self,
                channel_id: &str,
                playlist_name: &str,
            ) -> impl Future<Output = eyre::Result<Option<String>>> + Send {
                (**self).playlist_id(channel_id, playlist_name)
            }
        }
    )*};
}

forward_page_fetcher!(&F, Arc<F>);
