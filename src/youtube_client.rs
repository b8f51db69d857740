// YouTube Data API v3 client for channel, video, comment and category lookups
// Docs: https://developers.google.com/youtube/v3

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Upstream reasons that mean "slow down", not "this request is wrong".
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "dailyLimitExceeded",
];

#[derive(Error, Debug)]
pub enum YouTubeApiError {
    #[error("request to YouTube failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("YouTube API returned {status}: {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },
    #[error("failed to decode YouTube response: {0}")]
    Decode(String),
}

impl YouTubeApiError {
    pub fn is_quota(&self) -> bool {
        match self {
            YouTubeApiError::Api { status: 429, .. } => true,
            YouTubeApiError::Api { reason: Some(reason), .. } => {
                QUOTA_REASONS.contains(&reason.as_str())
            }
            _ => false,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            YouTubeApiError::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

/// The operations the service needs from the video platform.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// search.list restricted to channels
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<ChannelSearchResponse, YouTubeApiError>;

    /// channels.list for a single id with the given parts
    async fn list_channels(
        &self,
        channel_id: &str,
        part: &str,
    ) -> Result<ChannelListResponse, YouTubeApiError>;

    async fn list_playlists(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<PlaylistListResponse, YouTubeApiError>;

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse, YouTubeApiError>;

    async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentThreadsResponse, YouTubeApiError>;

    async fn list_videos(&self, video_id: &str) -> Result<VideoListResponse, YouTubeApiError>;

    async fn trending_videos(
        &self,
        region_code: &str,
        max_results: u32,
    ) -> Result<VideoListResponse, YouTubeApiError>;

    async fn video_categories(
        &self,
        region_code: &str,
    ) -> Result<VideoCategoryListResponse, YouTubeApiError>;
}

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

// ============================================================================
// Shared Structures
// ============================================================================

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Thumbnails {
    pub default: Option<ThumbnailInfo>,
    pub medium: Option<ThumbnailInfo>,
    pub high: Option<ThumbnailInfo>,
}

impl Thumbnails {
    pub fn high_url(&self) -> Option<String> {
        self.high.as_ref().map(|t| t.url.clone())
    }

    /// Best available thumbnail, largest first
    pub fn best_url(&self) -> Option<String> {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ThumbnailInfo {
    pub url: String,
}

/// Counts arrive as strings, occasionally as numbers. Anything else is dropped.
fn de_count<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ============================================================================
// Channel Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChannelStatistics {
    #[serde(rename = "viewCount", default, deserialize_with = "de_count")]
    pub view_count: Option<String>,
    #[serde(rename = "subscriberCount", default, deserialize_with = "de_count")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "videoCount", default, deserialize_with = "de_count")]
    pub video_count: Option<String>,
    #[serde(rename = "hiddenSubscriberCount")]
    pub hidden_subscriber_count: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSearchResponse {
    #[serde(default)]
    pub items: Vec<ChannelSearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSearchItem {
    pub id: ChannelSearchId,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSearchId {
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

// ============================================================================
// Playlist Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub snippet: PlaylistSnippet,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSnippet {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistContentDetails {
    #[serde(rename = "itemCount")]
    pub item_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

// ============================================================================
// Comment Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CommentThreadsResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Comment,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "authorDisplayName", default)]
    pub author_display_name: String,
    #[serde(rename = "authorChannelId")]
    pub author_channel_id: Option<AuthorChannelId>,
    #[serde(rename = "textDisplay", default)]
    pub text_display: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorChannelId {
    pub value: Option<String>,
}

// ============================================================================
// Video Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount", default, deserialize_with = "de_count")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount", default, deserialize_with = "de_count")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount", default, deserialize_with = "de_count")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoCategoryListResponse {
    #[serde(default)]
    pub items: Vec<VideoCategoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoCategoryItem {
    pub id: String,
    pub snippet: VideoCategorySnippet,
}

#[derive(Debug, Deserialize)]
pub struct VideoCategorySnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub assignable: bool,
}

// ============================================================================
// Error envelope returned by Google APIs
// ============================================================================

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    reason: Option<String>,
}

/// Turn a non-success response body into a classified error.
fn parse_api_error(status: u16, body: &str) -> YouTubeApiError {
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) => YouTubeApiError::Api {
            status,
            reason: envelope.error.errors.into_iter().find_map(|e| e.reason),
            message: envelope.error.message.unwrap_or_else(|| body.to_string()),
        },
        Err(_) => YouTubeApiError::Api {
            status,
            reason: None,
            message: body.to_string(),
        },
    }
}

// ============================================================================
// YouTube Client Implementation
// ============================================================================

impl YouTubeClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, YouTubeApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<T, YouTubeApiError> {
        let url = format!("{}/{}", self.base_url, resource);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = parse_api_error(status.as_u16(), &body);
            tracing::warn!("YouTube {} call failed: {}", resource, err);
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| YouTubeApiError::Decode(format!("{}: {}", resource, e)))
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<ChannelSearchResponse, YouTubeApiError> {
        self.get(
            "search",
            &[
                ("part", "id".to_string()),
                ("q", query.to_string()),
                ("type", "channel".to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    async fn list_channels(
        &self,
        channel_id: &str,
        part: &str,
    ) -> Result<ChannelListResponse, YouTubeApiError> {
        self.get(
            "channels",
            &[("part", part.to_string()), ("id", channel_id.to_string())],
        )
        .await
    }

    async fn list_playlists(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<PlaylistListResponse, YouTubeApiError> {
        self.get(
            "playlists",
            &[
                ("part", "snippet,contentDetails".to_string()),
                ("channelId", channel_id.to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse, YouTubeApiError> {
        self.get(
            "playlistItems",
            &[
                ("part", "snippet".to_string()),
                ("playlistId", playlist_id.to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentThreadsResponse, YouTubeApiError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("videoId", video_id.to_string()),
            ("maxResults", max_results.to_string()),
        ];

        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        self.get("commentThreads", &params).await
    }

    async fn list_videos(&self, video_id: &str) -> Result<VideoListResponse, YouTubeApiError> {
        self.get(
            "videos",
            &[
                ("part", "snippet,statistics".to_string()),
                ("id", video_id.to_string()),
            ],
        )
        .await
    }

    async fn trending_videos(
        &self,
        region_code: &str,
        max_results: u32,
    ) -> Result<VideoListResponse, YouTubeApiError> {
        self.get(
            "videos",
            &[
                ("part", "snippet,statistics".to_string()),
                ("chart", "mostPopular".to_string()),
                ("regionCode", region_code.to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    async fn video_categories(
        &self,
        region_code: &str,
    ) -> Result<VideoCategoryListResponse, YouTubeApiError> {
        self.get(
            "videoCategories",
            &[
                ("part", "snippet".to_string()),
                ("regionCode", region_code.to_string()),
            ],
        )
        .await
    }
}
