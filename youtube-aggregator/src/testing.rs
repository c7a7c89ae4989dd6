//! Deterministic in-memory [`PageFetcher`] for tests.
//!
//! Pages are served in the order they were registered. The continuation token of page `n` is
//! the string `n`, and every call is recorded as `"<what> <id> <token|none>"`.

use crate::fetch::{PageFetcher, VIDEO_BATCH_SIZE};
use crate::youtube_api::{Comment, Page, Video, VideoStatistics};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub(crate) fn video(id: &str) -> Video {
    Video {
        id: id.to_string(),
        title: format!("video {id}"),
        channel_id: "UCstub".to_string(),
        channel_title: "stub".to_string(),
        published_at: None,
        statistics: VideoStatistics::default(),
        duration: None,
    }
}

/// A top-level comment that reports `total_reply_count` replies but carries none yet.
pub(crate) fn comment(id: &str, total_reply_count: u32) -> Comment {
    Comment {
        id: id.to_string(),
        author: "author".to_string(),
        text: format!("comment {id}"),
        published_at: None,
        updated_at: None,
        like_count: 0,
        parent_id: None,
        total_reply_count,
        replies: Vec::new(),
    }
}

pub(crate) fn reply(id: &str, parent_id: &str) -> Comment {
    Comment {
        parent_id: Some(parent_id.to_string()),
        ..comment(id, 0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct StubFetcher {
    threads: HashMap<String, Vec<Vec<Comment>>>,
    replies: HashMap<String, Vec<Vec<Comment>>>,
    playlists: HashMap<String, Vec<Vec<Video>>>,
    endless: HashSet<String>,
    videos: HashMap<String, Video>,
    uploads: HashMap<String, String>,
    channels: HashMap<String, String>,
    playlist_names: HashMap<(String, String), String>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn with_threads(mut self, video_id: &str, pages: Vec<Vec<Comment>>) -> Self {
        self.threads.insert(video_id.to_string(), pages);
        self
    }

    pub(crate) fn with_replies(mut self, parent_id: &str, pages: Vec<Vec<Comment>>) -> Self {
        self.replies.insert(parent_id.to_string(), pages);
        self
    }

    pub(crate) fn with_playlist(mut self, playlist_id: &str, pages: Vec<Vec<Video>>) -> Self {
        self.playlists.insert(playlist_id.to_string(), pages);
        self
    }

    /// A playlist that hands out a continuation token on every page.
    pub(crate) fn endless(mut self, playlist_id: &str) -> Self {
        self.endless.insert(playlist_id.to_string());
        self
    }

    pub(crate) fn with_videos(mut self, videos: Vec<Video>) -> Self {
        self.videos
            .extend(videos.into_iter().map(|video| (video.id.clone(), video)));
        self
    }

    pub(crate) fn with_uploads(mut self, channel_id: &str, playlist_id: &str) -> Self {
        self.uploads
            .insert(channel_id.to_string(), playlist_id.to_string());
        self
    }

    pub(crate) fn with_channel(mut self, name: &str, channel_id: &str) -> Self {
        self.channels.insert(name.to_string(), channel_id.to_string());
        self
    }

    pub(crate) fn with_playlist_name(mut self, channel_id: &str, name: &str, id: &str) -> Self {
        self.playlist_names
            .insert((channel_id.to_string(), name.to_string()), id.to_string());
        self
    }

    /// Makes every fetch scoped to `id` fail.
    pub(crate) fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, id: &str) -> eyre::Result<()> {
        if self.failing.contains(id) {
            eyre::bail!("stub failure for {id}");
        }
        Ok(())
    }

    fn serve<T: Clone>(
        &self,
        what: &str,
        pages: Option<&Vec<Vec<T>>>,
        id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<Page<T>> {
        self.record(format!(
            "{what} {id} {}",
            page_token.as_deref().unwrap_or("none")
        ));
        self.check(id)?;

        let index = match page_token {
            None => 0,
            Some(token) => token.parse::<usize>()?,
        };
        let Some(pages) = pages else {
            eyre::ensure!(index == 0, "token {index} for unknown {what} {id}");
            return Ok(Page::last(Vec::new()));
        };
        let Some(items) = pages.get(index) else {
            eyre::bail!("token {index} is past the last {what} page of {id}");
        };
        let next_page_token = (index + 1 < pages.len()).then(|| (index + 1).to_string());
        Ok(Page {
            items: items.clone(),
            next_page_token,
        })
    }
}

impl PageFetcher for StubFetcher {
    async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<Page<Comment>> {
        self.serve("threads", self.threads.get(video_id), video_id, page_token)
    }

    async fn comment_replies(
        &self,
        parent_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<Page<Comment>> {
        self.serve("replies", self.replies.get(parent_id), parent_id, page_token)
    }

    async fn playlist_videos(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<Page<Video>> {
        if self.endless.contains(playlist_id) {
            self.record(format!("playlist {playlist_id} endless"));
            return Ok(Page::more(vec![video("again")], "again"));
        }
        self.serve(
            "playlist",
            self.playlists.get(playlist_id),
            playlist_id,
            page_token,
        )
    }

    async fn videos(&self, ids: &[String]) -> eyre::Result<Vec<Video>> {
        self.record(format!("videos {}", ids.len()));
        eyre::ensure!(ids.len() <= VIDEO_BATCH_SIZE, "batch too large");
        for id in ids {
            self.check(id)?;
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.videos.get(id).cloned())
            .collect())
    }

    async fn uploads_playlist_id(&self, channel_id: &str) -> eyre::Result<Option<String>> {
        self.record(format!("uploads {channel_id}"));
        self.check(channel_id)?;
        Ok(self.uploads.get(channel_id).cloned())
    }

    async fn channel_id(&self, channel_name: &str) -> eyre::Result<Option<String>> {
        self.record(format!("channel {channel_name}"));
        self.check(channel_name)?;
        Ok(self.channels.get(channel_name).cloned())
    }

    async fn playlist_id(
        &self,
        channel_id: &str,
        playlist_name: &str,
    ) -> eyre::Result<Option<String>> {
        self.record(format!("playlist-name {channel_id} {playlist_name}"));
        self.check(channel_id)?;
        Ok(self
            .playlist_names
            .get(&(channel_id.to_string(), playlist_name.to_string()))
            .cloned())
    }
}
