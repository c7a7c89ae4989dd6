//! YouTube Playlists and PlaylistItems API types.

use serde::Deserialize;

/// A `playlistItem` resource, of which only the referenced video is used.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemResource {
    #[serde(rename = "contentDetails")]
    pub(crate) content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    pub(crate) video_id: String,
}

/// A `playlist` resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists#resource>
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistResource {
    pub(crate) id: String,
    pub(crate) snippet: PlaylistSnippet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistSnippet {
    pub(crate) title: String,
}
