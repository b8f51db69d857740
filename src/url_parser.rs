// Structured parsing of YouTube URLs into channel or video targets
use url::Url;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelReference {
    /// `/channel/UC...`
    Id(String),
    /// `/@handle`
    Handle(String),
    /// `/c/<name>` or `/user/<name>`
    Custom(String),
}

impl ChannelReference {
    /// Text that identifies the channel for resolution (id or search query).
    pub fn as_str(&self) -> &str {
        match self {
            ChannelReference::Id(id) => id,
            ChannelReference::Handle(name) | ChannelReference::Custom(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YouTubeTarget {
    Channel(ChannelReference),
    Video(String),
}

fn is_youtube_host(host: &str) -> bool {
    host == "youtube.com" || host.ends_with(".youtube.com")
}

fn invalid(raw: &str) -> ApiError {
    ApiError::InvalidInput(format!("Unsupported YouTube URL: {}", raw))
}

/// Classify a YouTube URL by host and path segments.
///
/// Inputs without a scheme (`youtube.com/@name`) are treated as https.
pub fn parse_youtube_url(raw: &str) -> Result<YouTubeTarget, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("URL is required".to_string()));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| ApiError::InvalidInput(format!("Invalid URL '{}': {}", trimmed, e)))?;

    let host = url
        .host_str()
        .map(|h| h.to_ascii_lowercase())
        .ok_or_else(|| invalid(trimmed))?;

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if host == "youtu.be" || host == "www.youtu.be" {
        return match segments.first() {
            Some(id) => Ok(YouTubeTarget::Video((*id).to_string())),
            None => Err(invalid(trimmed)),
        };
    }

    if !is_youtube_host(&host) {
        return Err(ApiError::InvalidInput(format!("Not a YouTube URL: {}", trimmed)));
    }

    match segments.as_slice() {
        ["watch", ..] => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|v| !v.is_empty())
            .map(YouTubeTarget::Video)
            .ok_or_else(|| invalid(trimmed)),
        ["shorts", id, ..] | ["live", id, ..] | ["embed", id, ..] => {
            Ok(YouTubeTarget::Video((*id).to_string()))
        }
        ["channel", id, ..] => Ok(YouTubeTarget::Channel(ChannelReference::Id((*id).to_string()))),
        ["c", name, ..] | ["user", name, ..] => {
            Ok(YouTubeTarget::Channel(ChannelReference::Custom((*name).to_string())))
        }
        [first, ..] if first.starts_with('@') && first.len() > 1 => Ok(YouTubeTarget::Channel(
            ChannelReference::Handle(first.trim_start_matches('@').to_string()),
        )),
        _ => Err(invalid(trimmed)),
    }
}
