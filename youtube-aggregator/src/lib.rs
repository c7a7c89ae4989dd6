//! Exhaustive pagination over the YouTube Data API v3.
//!
//! The [`Aggregator`] turns one logical request (every comment on a video, every video in a
//! playlist, every upload of a channel, or a batch of videos looked up by id) into the sequence
//! of page fetches the remote API requires, and hands back the fully merged result.
//!
//! Network access is behind the [`PageFetcher`] trait. [`YouTubeClient`] is the reqwest-backed
//! implementation; tests drive the aggregator with deterministic in-memory fetchers instead.
//!
//! Every traversal takes a [`TraverseOptions`], which carries an optional [`Progress`] sink, an
//! optional [`CancelToken`] and the runaway guard for fetchers that never stop handing out
//! continuation tokens.
//!
//! ```rust,no_run
//! use youtube_aggregator::{Aggregator, ClientConfig, TraverseOptions, YouTubeClient, cancellation};
//!
//! # async fn example() -> eyre::Result<()> {
//! let aggregator = Aggregator::new(YouTubeClient::new(ClientConfig::new("api-key")));
//! let (_handle, token) = cancellation();
//! let progress = |count: usize| eprintln!("{count} comments so far");
//! let options = TraverseOptions::default().progress(&progress).cancel(&token);
//!
//! let comments = aggregator.comments("dQw4w9WgXcQ", &options).await?;
//! println!("{} top-level comments", comments.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cancel;
pub mod error;
pub mod fetch;
pub mod options;
mod pager;
pub mod progress;
pub mod resolve;
pub mod youtube_api;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::Aggregator;
pub use cancel::{CancelHandle, CancelToken, cancellation};
pub use error::{Error, Result};
pub use fetch::{PageFetcher, VIDEO_BATCH_SIZE};
pub use options::{ReplyProgress, TraverseOptions};
pub use progress::Progress;
pub use resolve::parse_video_id;
pub use youtube_api::{
    ClientConfig, Comment, Page, ResourceKind, Video, VideoStatistics, YouTubeClient,
};
