//! YouTube Channels API types.

use serde::Deserialize;

/// A `channel` resource.
///
/// Only the id and, when requested, the uploads playlist are read.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Deserialize)]
pub(crate) struct ChannelResource {
    pub(crate) id: String,
    #[serde(rename = "contentDetails")]
    pub(crate) content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists", default)]
    pub(crate) related_playlists: RelatedPlaylists,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RelatedPlaylists {
    /// The playlist holding every video the channel has uploaded.
    pub(crate) uploads: Option<String>,
}

impl ChannelResource {
    pub(crate) fn uploads_playlist_id(self) -> Option<String> {
        self.content_details?
            .related_playlists
            .uploads
            .filter(|id| !id.is_empty())
    }
}
