//! Extracting identifiers from user input.

use reqwest::Url;

/// Returns the video id carried in the `v` query parameter of a watch URL such as
/// `https://www.youtube.com/watch?v=dQw4w9WgXcQ`.
///
/// Returns `None` for anything that is not an absolute URL with a non-empty `v` parameter.
pub fn parse_video_id(uri: &str) -> Option<String> {
    let url = Url::parse(uri).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}
