//! YouTube Videos API types.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// A snapshot of a YouTube video at the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    pub title: String,
    /// The channel that uploaded the video.
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: Option<Timestamp>,
    pub statistics: VideoStatistics,
    /// Absent for upcoming live streams and whenever the API reports a length that does not fit
    /// a fixed-size duration.
    pub duration: Option<SignedDuration>,
}

/// Statistics about the video.
///
/// Counts the owner has hidden are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatistics {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

/// A `video` resource as returned by `videos.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Deserialize)]
pub(crate) struct VideoResource {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) snippet: VideoSnippet,
    #[serde(default)]
    pub(crate) statistics: RawStatistics,
    #[serde(rename = "contentDetails", default)]
    pub(crate) content_details: VideoContentDetails,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VideoSnippet {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(rename = "channelId", default)]
    pub(crate) channel_id: String,
    #[serde(rename = "channelTitle", default)]
    pub(crate) channel_title: String,
    #[serde(rename = "publishedAt")]
    pub(crate) published_at: Option<Timestamp>,
}

/// The API serializes counts as decimal strings.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawStatistics {
    #[serde(rename = "viewCount")]
    pub(crate) view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub(crate) like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub(crate) comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VideoContentDetails {
    /// ISO 8601, e.g. `PT4M13S`.
    pub(crate) duration: Option<String>,
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|count| count.parse().ok())
}

/// Parses an ISO 8601 duration. Durations with calendar units (`P1D`) are rejected.
pub(crate) fn parse_duration(raw: &str) -> Option<SignedDuration> {
    raw.parse().ok()
}

impl From<VideoResource> for Video {
    fn from(resource: VideoResource) -> Self {
        let statistics = VideoStatistics {
            view_count: parse_count(resource.statistics.view_count.as_deref()),
            like_count: parse_count(resource.statistics.like_count.as_deref()),
            comment_count: parse_count(resource.statistics.comment_count.as_deref()),
        };
        Self {
            id: resource.id,
            title: resource.snippet.title,
            channel_id: resource.snippet.channel_id,
            channel_title: resource.snippet.channel_title,
            published_at: resource.snippet.published_at,
            statistics,
            duration: resource
                .content_details
                .duration
                .as_deref()
                .and_then(parse_duration),
        }
    }
}
