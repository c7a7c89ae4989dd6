//! YouTube Data API v3 resources and the HTTP client that fetches them.
//!
//! The public types here ([`Video`], [`Comment`], [`Page`]) are what the aggregator hands back.
//! The `*Resource` types mirror the API's JSON and only exist to be converted into them.
//!
//! Endpoints used:
//!
//! - `commentThreads.list`: top-level comments of a video, with up to five replies inlined
//! - `comments.list`: the complete reply list of one comment
//! - `playlistItems.list`: the video ids of a playlist
//! - `videos.list`: up to 50 videos by id
//! - `channels.list`: channel ids by handle or username, and a channel's uploads playlist
//! - `playlists.list`: a channel's playlists

pub mod channels;
pub mod client;
pub mod comments;
pub mod playlists;
pub mod types;
pub mod videos;

pub use client::{ClientConfig, DEFAULT_BASE_URL, YouTubeClient};
pub use comments::Comment;
pub use types::{Page, PageInfo, ResourceKind};
pub use videos::{Video, VideoStatistics};
