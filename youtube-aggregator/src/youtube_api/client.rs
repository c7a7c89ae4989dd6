//! reqwest-backed [`PageFetcher`] for the YouTube Data API v3.

use crate::fetch::{PageFetcher, VIDEO_BATCH_SIZE};
use crate::options::TraverseOptions;
use crate::pager::Pager;
use crate::youtube_api::{
    Comment, Page, ResourceKind, Video,
    channels::ChannelResource,
    comments::{CommentResource, CommentThreadResource},
    playlists::{PlaylistItemResource, PlaylistResource},
    types::ListResponse,
    videos::VideoResource,
};
use eyre::Context;
use http::Method;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Largest page the `commentThreads` and `comments` endpoints hand out.
const MAX_COMMENT_PAGE_SIZE: u32 = 100;

/// Largest page every other list endpoint hands out.
const MAX_PAGE_SIZE: u32 = 50;

/// Connection settings for [`YouTubeClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent as the `key` query parameter on every request.
    pub api_key: String,
    /// Endpoint root, without a trailing slash.
    pub base_url: String,
    /// `maxResults` for playlist, channel and playlist-item listings. Clamped to 1..=50.
    pub page_size: u32,
    /// `maxResults` for comment listings. Clamped to 1..=100.
    pub comment_page_size: u32,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: MAX_PAGE_SIZE,
            comment_page_size: MAX_COMMENT_PAGE_SIZE,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("comment_page_size", &self.comment_page_size)
            .finish()
    }
}

/// Client for the read-only parts of the YouTube Data API v3 used by the aggregator.
///
/// Every method is a single round trip (plus video hydration for playlist pages). Failures are
/// reported as-is; there are no retries here.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    config: Arc<ClientConfig>,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a client that shares an existing connection pool.
    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    fn page_size(&self) -> String {
        self.config.page_size.clamp(1, MAX_PAGE_SIZE).to_string()
    }

    fn comment_page_size(&self) -> String {
        self.config
            .comment_page_size
            .clamp(1, MAX_COMMENT_PAGE_SIZE)
            .to_string()
    }

    /// Makes a GET request against `endpoint` and parses the JSON body.
    ///
    /// Non-success statuses are turned into errors that include the response body, since that
    /// is where YouTube explains quota, permission and not-found failures.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get_json<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<R> {
        let method = Method::GET;
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .request(method.clone(), &url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(query_params)
            .send()
            .await
            .with_context(|| format!("send {method} request to YouTube API: {endpoint}"))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} {} failed with status {}: {}",
                method,
                endpoint,
                status_code,
                error_text
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("parse YouTube {endpoint} API response as JSON"))
    }

    async fn list<'q, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut query_params: Vec<(&'q str, &'q str)>,
        page_token: Option<&'q str>,
    ) -> eyre::Result<ListResponse<R>> {
        if let Some(token) = page_token {
            query_params.push(("pageToken", token));
        }
        let response: ListResponse<R> = self.get_json(endpoint, &query_params).await?;

        tracing::debug!(
            endpoint,
            total_results = response.page_info.total_results,
            returned_items = response.items.len(),
            "fetched list page"
        );

        Ok(response)
    }
}

/// Orders `videos` by `ids`, repeating videos whose id repeats and dropping ids the API did not
/// return.
fn in_id_order(ids: &[String], videos: Vec<Video>) -> Vec<Video> {
    let by_id: HashMap<String, Video> = videos
        .into_iter()
        .map(|video| (video.id.clone(), video))
        .collect();
    ids.iter().filter_map(|id| by_id.get(id).cloned()).collect()
}

impl PageFetcher for YouTubeClient {
    #[instrument(skip(self))]
    async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<Page<Comment>> {
        let max_results = self.comment_page_size();
        let query_params = vec![
            ("part", "snippet,replies"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        let mut response: ListResponse<CommentThreadResource> = self
            .list("commentThreads", query_params, page_token.as_deref())
            .await
            .with_context(|| format!("list comment threads of video {video_id}"))?;

        let next_page_token = response.next_page_token();
        Ok(Page {
            items: response.items.into_iter().map(Comment::from).collect(),
            next_page_token,
        })
    }

    #[instrument(skip(self))]
    async fn comment_replies(
        &self,
        parent_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<Page<Comment>> {
        let max_results = self.comment_page_size();
        let query_params = vec![
            ("part", "snippet"),
            ("parentId", parent_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "plainText"),
        ];
        let mut response: ListResponse<CommentResource> = self
            .list("comments", query_params, page_token.as_deref())
            .await
            .with_context(|| format!("list replies to comment {parent_id}"))?;

        let next_page_token = response.next_page_token();
        Ok(Page {
            items: response.items.into_iter().map(Comment::from).collect(),
            next_page_token,
        })
    }

    /// `playlistItems` only carries video ids, so every page is followed by one `videos` lookup
    /// to fill in titles, statistics and durations.
    #[instrument(skip(self))]
    async fn playlist_videos(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> eyre::Result<Page<Video>> {
        let max_results = self.page_size();
        let query_params = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        let mut response: ListResponse<PlaylistItemResource> = self
            .list("playlistItems", query_params, page_token.as_deref())
            .await
            .with_context(|| format!("list items of playlist {playlist_id}"))?;

        let next_page_token = response.next_page_token();
        let ids: Vec<String> = response
            .items
            .into_iter()
            .map(|item| item.content_details.video_id)
            .collect();

        let mut items = Vec::with_capacity(ids.len());
        for batch in ids.chunks(VIDEO_BATCH_SIZE) {
            items.extend(
                self.videos(batch)
                    .await
                    .with_context(|| format!("look up videos of playlist {playlist_id}"))?,
            );
        }
        if items.len() < ids.len() {
            tracing::debug!(
                playlist_id,
                listed = ids.len(),
                found = items.len(),
                "playlist references videos that are no longer available"
            );
        }

        Ok(Page {
            items,
            next_page_token,
        })
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn videos(&self, ids: &[String]) -> eyre::Result<Vec<Video>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        eyre::ensure!(
            ids.len() <= VIDEO_BATCH_SIZE,
            "at most {VIDEO_BATCH_SIZE} videos can be looked up at once, got {}",
            ids.len()
        );

        let joined = ids.join(",");
        let query_params = vec![
            ("part", "snippet,statistics,contentDetails"),
            ("id", joined.as_str()),
        ];
        let response: ListResponse<VideoResource> = self.list("videos", query_params, None).await?;
        let videos = response.items.into_iter().map(Video::from).collect();

        Ok(in_id_order(ids, videos))
    }

    #[instrument(skip(self))]
    async fn uploads_playlist_id(&self, channel_id: &str) -> eyre::Result<Option<String>> {
        let query_params = vec![("part", "contentDetails"), ("id", channel_id)];
        let response: ListResponse<ChannelResource> = self
            .list("channels", query_params, None)
            .await
            .with_context(|| format!("look up channel {channel_id}"))?;

        Ok(response
            .items
            .into_iter()
            .next()
            .and_then(ChannelResource::uploads_playlist_id))
    }

    /// Names starting with `@` are looked up as handles, anything else as a legacy username.
    #[instrument(skip(self))]
    async fn channel_id(&self, channel_name: &str) -> eyre::Result<Option<String>> {
        let lookup = if channel_name.starts_with('@') {
            ("forHandle", channel_name)
        } else {
            ("forUsername", channel_name)
        };
        let query_params = vec![("part", "id"), lookup];
        let response: ListResponse<ChannelResource> = self
            .list("channels", query_params, None)
            .await
            .with_context(|| format!("look up channel named {channel_name}"))?;

        Ok(response.items.into_iter().next().map(|channel| channel.id))
    }

    /// Walks the channel's playlists until one is titled exactly `playlist_name`.
    #[instrument(skip(self))]
    async fn playlist_id(
        &self,
        channel_id: &str,
        playlist_name: &str,
    ) -> eyre::Result<Option<String>> {
        let options = TraverseOptions::default();
        let mut pager = Pager::new(ResourceKind::Playlists, channel_id, &options);
        let max_results = self.page_size();
        let max_results = max_results.as_str();

        while let Some(playlists) = pager
            .next_page(|token| async move {
                let query_params = vec![
                    ("part", "snippet"),
                    ("channelId", channel_id),
                    ("maxResults", max_results),
                ];
                let mut response: ListResponse<PlaylistResource> = self
                    .list("playlists", query_params, token.as_deref())
                    .await?;
                let next_page_token = response.next_page_token();
                Ok::<_, eyre::Report>(Page {
                    items: response.items,
                    next_page_token,
                })
            })
            .await?
        {
            if let Some(playlist) = playlists
                .into_iter()
                .find(|playlist| playlist.snippet.title == playlist_name)
            {
                return Ok(Some(playlist.id));
            }
        }

        Ok(None)
    }
}
