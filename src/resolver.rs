// Channel identifier validation and resolution to canonical channel ids
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;
use crate::url_parser::{parse_youtube_url, ChannelReference, YouTubeTarget};
use crate::youtube_client::VideoPlatform;

lazy_static! {
    static ref CHANNEL_ID_RE: Regex = Regex::new(r"^UC[A-Za-z0-9_-]{22}$").unwrap();
}

pub fn is_canonical_channel_id(identifier: &str) -> bool {
    CHANNEL_ID_RE.is_match(identifier)
}

/// Accepts canonical ids, `@handles` and youtube.com URLs.
pub fn is_valid_channel_identifier(identifier: &str) -> bool {
    if identifier.chars().count() < 2 {
        return false;
    }

    is_canonical_channel_id(identifier)
        || identifier.starts_with('@')
        || identifier.contains("youtube.com")
}

/// Resolve a channel identifier to its canonical id.
///
/// Canonical ids (and `/channel/UC...` URLs) need no remote call. Anything
/// else becomes a single channel search whose first result wins.
pub async fn resolve_channel_id(
    platform: &dyn VideoPlatform,
    identifier: &str,
) -> Result<String, ApiError> {
    let identifier = identifier.trim();

    if is_canonical_channel_id(identifier) {
        return Ok(identifier.to_string());
    }

    if identifier.contains("youtube.com") {
        return match parse_youtube_url(identifier)? {
            YouTubeTarget::Channel(reference) => resolve_reference(platform, &reference).await,
            YouTubeTarget::Video(_) => Err(ApiError::InvalidInput(
                "Expected a channel URL, got a video URL".to_string(),
            )),
        };
    }

    search_channel(platform, identifier.trim_start_matches('@')).await
}

/// Resolve a channel reference parsed out of a URL.
pub async fn resolve_reference(
    platform: &dyn VideoPlatform,
    reference: &ChannelReference,
) -> Result<String, ApiError> {
    match reference {
        ChannelReference::Id(id) if is_canonical_channel_id(id) => Ok(id.clone()),
        other => search_channel(platform, other.as_str()).await,
    }
}

async fn search_channel(platform: &dyn VideoPlatform, query: &str) -> Result<String, ApiError> {
    if query.is_empty() {
        return Err(ApiError::InvalidInput("Invalid channel identifier".to_string()));
    }

    tracing::debug!("Searching for channel matching '{}'", query);

    let response = platform.search_channels(query, 1).await?;

    response
        .items
        .into_iter()
        .find_map(|item| item.id.channel_id)
        .ok_or_else(|| ApiError::NotFound("Channel not found".to_string()))
}
