use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::formatting::format_optional_count;
use crate::youtube_client::{ChannelItem, Playlist, VideoCategoryItem, VideoItem};

const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Channel Models
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChannelResponse {
    pub channel_id: String,
    pub channel_name: String,
    pub subscriber_count: String,
    pub total_videos: String,
    pub view_count: String,
    pub channel_description: String,
    pub channel_location: String,
    pub profile_picture: Option<String>,
    pub analytics: ChannelAnalytics,
    pub created_at: Option<String>,
    pub last_updated: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChannelAnalytics {
    pub upload_frequency: UploadFrequency,
    pub playlists: Vec<PlaylistSummary>,
    pub engagement_rate: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadFrequency {
    pub frequency: String,
    pub uploads_per_month: f64,
}

impl UploadFrequency {
    pub fn new(frequency: impl Into<String>, uploads_per_month: f64) -> Self {
        Self {
            frequency: frequency.into(),
            uploads_per_month,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaylistSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub item_count: u64,
    pub published_at: Option<String>,
}

impl From<Playlist> for PlaylistSummary {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: playlist.id,
            title: playlist.snippet.title,
            description: playlist.snippet.description.unwrap_or_default(),
            thumbnail: playlist.snippet.thumbnails.and_then(|t| t.high_url()),
            item_count: playlist
                .content_details
                .and_then(|c| c.item_count)
                .unwrap_or(0),
            published_at: playlist.snippet.published_at,
        }
    }
}

impl ChannelResponse {
    /// Flatten a channels.list record. The snippet is the only required part.
    pub fn from_channel(item: ChannelItem, analytics: ChannelAnalytics) -> Result<Self, ApiError> {
        let snippet = item
            .snippet
            .ok_or_else(|| ApiError::NotFound("Channel not found".to_string()))?;
        let statistics = item.statistics.unwrap_or_default();

        Ok(Self {
            channel_id: item.id,
            channel_name: snippet.title,
            subscriber_count: format_optional_count(statistics.subscriber_count.as_deref()),
            total_videos: format_optional_count(statistics.video_count.as_deref()),
            view_count: format_optional_count(statistics.view_count.as_deref()),
            channel_description: snippet
                .description
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            channel_location: snippet.country.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            profile_picture: snippet.thumbnails.and_then(|t| t.high_url()),
            analytics,
            created_at: snippet.published_at,
            last_updated: chrono::Utc::now().to_rfc3339(),
        })
    }
}

// ============================================================================
// Video Models
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoResponse {
    pub video_id: String,
    pub video_title: String,
    pub description: String,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    pub thumbnail: Option<String>,
    pub published_at: Option<String>,
    pub comments: Vec<CommentEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CommentEntry {
    pub username: String,
    pub comment: String,
    pub timestamp: String,
    pub profile_picture: Option<String>,
}

impl VideoResponse {
    pub fn from_video(item: VideoItem, comments: Vec<CommentEntry>) -> Result<Self, ApiError> {
        let snippet = item
            .snippet
            .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;
        let statistics = item.statistics.unwrap_or_default();

        Ok(Self {
            video_id: item.id,
            video_title: snippet.title,
            description: snippet.description.unwrap_or_default(),
            view_count: statistics.view_count.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            like_count: statistics.like_count.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            comment_count: statistics
                .comment_count
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            thumbnail: snippet.thumbnails.and_then(|t| t.best_url()),
            published_at: snippet.published_at,
            comments,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrendingVideo {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
    pub published_at: Option<String>,
}

impl From<VideoItem> for TrendingVideo {
    fn from(item: VideoItem) -> Self {
        let statistics = item.statistics.unwrap_or_default();
        let (title, description, thumbnail, published_at) = match item.snippet {
            Some(s) => (
                s.title,
                s.description.unwrap_or_default(),
                s.thumbnails.and_then(|t| t.best_url()),
                s.published_at,
            ),
            None => (String::new(), String::new(), None, None),
        };

        Self {
            video_id: item.id,
            title,
            description,
            thumbnail,
            view_count: statistics.view_count.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            like_count: statistics.like_count.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            comment_count: statistics
                .comment_count
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            published_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub region_code: String,
    pub trending_videos: Vec<TrendingVideo>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoCategory {
    pub category_id: String,
    pub title: String,
    pub assignable: bool,
}

impl From<VideoCategoryItem> for VideoCategory {
    fn from(item: VideoCategoryItem) -> Self {
        Self {
            category_id: item.id,
            title: item.snippet.title,
            assignable: item.snippet.assignable,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub region_code: String,
    pub categories: Vec<VideoCategory>,
}

// ============================================================================
// Request Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    #[serde(rename = "regionCode")]
    pub region_code: Option<String>,
    #[serde(rename = "maxResults")]
    pub max_results: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ScrapeResponse {
    Channel(ChannelResponse),
    Video(VideoResponse),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{channel_json, video_json};
    use serde_json::json;

    fn empty_analytics() -> ChannelAnalytics {
        ChannelAnalytics {
            upload_frequency: UploadFrequency::new("No recent uploads", 0.0),
            playlists: vec![],
            engagement_rate: 0.0,
        }
    }

    #[test]
    fn test_channel_response_formats_counts() {
        let item: ChannelItem = serde_json::from_value(channel_json(
            "UCabcdefghijklmnopqrstuv",
            "Rustaceans",
            "1500000",
            "98700",
            "999",
        ))
        .unwrap();

        let response = ChannelResponse::from_channel(item, empty_analytics()).unwrap();
        assert_eq!(response.subscriber_count, "1.5M");
        assert_eq!(response.view_count, "98.7K");
        assert_eq!(response.total_videos, "999");
        assert_eq!(response.channel_location, "US");
        assert_eq!(
            response.profile_picture.as_deref(),
            Some("https://yt3.ggpht.com/UCabcdefghijklmnopqrstuv-high.jpg")
        );
    }

    #[test]
    fn test_channel_response_fallbacks() {
        let item: ChannelItem = serde_json::from_value(json!({
            "id": "UCabcdefghijklmnopqrstuv",
            "snippet": {"title": "Bare"}
        }))
        .unwrap();

        let response = ChannelResponse::from_channel(item, empty_analytics()).unwrap();
        assert_eq!(response.channel_description, "N/A");
        assert_eq!(response.channel_location, "N/A");
        assert_eq!(response.subscriber_count, "0");
        assert_eq!(response.profile_picture, None);
        assert_eq!(response.created_at, None);
    }

    #[test]
    fn test_channel_without_snippet_is_not_found() {
        let item: ChannelItem = serde_json::from_value(json!({"id": "UCabcdefghijklmnopqrstuv"})).unwrap();
        let err = ChannelResponse::from_channel(item, empty_analytics()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_video_response_missing_statistics() {
        let mut raw = video_json("dQw4w9WgXcQ", "Never Gonna");
        raw["statistics"] = json!({"viewCount": "10"});
        let item: VideoItem = serde_json::from_value(raw).unwrap();

        let response = VideoResponse::from_video(item, vec![]).unwrap();
        assert_eq!(response.view_count, "10");
        assert_eq!(response.like_count, "N/A");
        assert_eq!(response.comment_count, "N/A");
    }

    #[test]
    fn test_scrape_response_is_tagged() {
        let item: VideoItem = serde_json::from_value(video_json("dQw4w9WgXcQ", "Never Gonna")).unwrap();
        let video = VideoResponse::from_video(item, vec![]).unwrap();

        let value = serde_json::to_value(ScrapeResponse::Video(video)).unwrap();
        assert_eq!(value["type"], "video");
        assert_eq!(value["data"]["video_title"], "Never Gonna");
    }
}
