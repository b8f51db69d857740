// In-memory VideoPlatform used by unit tests
use crate::youtube_client::*;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned responses and records every call it receives.
///
/// Call keys look like `search:<query>`, `channels:<id>`, `comments:<video>:<token>:<max>`.
/// A key registered with `fail_with` makes the matching call return an API error.
#[derive(Default)]
pub struct FakePlatform {
    calls: Mutex<Vec<String>>,
    pub search_results: HashMap<String, Vec<String>>,
    pub channels: HashMap<String, Value>,
    pub playlists: HashMap<String, Vec<Value>>,
    pub playlist_items: HashMap<String, Vec<Value>>,
    pub comment_pages: HashMap<String, Vec<Vec<Value>>>,
    pub videos: HashMap<String, Value>,
    pub trending: Vec<Value>,
    pub categories: Vec<Value>,
    failures: HashMap<String, (u16, String)>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(mut self, key: &str, status: u16, reason: &str) -> Self {
        self.failures.insert(key.to_string(), (status, reason.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls().into_iter().filter(|c| c.starts_with(prefix)).collect()
    }

    fn record(&self, key: String) -> Result<(), YouTubeApiError> {
        self.calls.lock().unwrap().push(key.clone());
        let matched = self
            .failures
            .iter()
            .find(|(prefix, _)| key.starts_with(prefix.as_str()));

        match matched {
            Some((_, (status, reason))) => Err(YouTubeApiError::Api {
                status: *status,
                reason: Some(reason.clone()),
                message: format!("fake failure for {}", key),
            }),
            None => Ok(()),
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, YouTubeApiError> {
    serde_json::from_value(value).map_err(|e| YouTubeApiError::Decode(e.to_string()))
}

#[async_trait]
impl VideoPlatform for FakePlatform {
    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<ChannelSearchResponse, YouTubeApiError> {
        self.record(format!("search:{}", query))?;
        let items: Vec<Value> = self
            .search_results
            .get(query)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(max_results as usize)
            .map(|id| json!({"id": {"kind": "youtube#channel", "channelId": id}}))
            .collect();
        decode(json!({ "items": items }))
    }

    async fn list_channels(
        &self,
        channel_id: &str,
        _part: &str,
    ) -> Result<ChannelListResponse, YouTubeApiError> {
        self.record(format!("channels:{}", channel_id))?;
        let items: Vec<Value> = self.channels.get(channel_id).cloned().into_iter().collect();
        decode(json!({ "items": items }))
    }

    async fn list_playlists(
        &self,
        channel_id: &str,
        _max_results: u32,
    ) -> Result<PlaylistListResponse, YouTubeApiError> {
        self.record(format!("playlists:{}", channel_id))?;
        let items = self.playlists.get(channel_id).cloned().unwrap_or_default();
        decode(json!({ "items": items }))
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse, YouTubeApiError> {
        self.record(format!("playlistItems:{}:{}", playlist_id, max_results))?;
        let items = self.playlist_items.get(playlist_id).cloned().unwrap_or_default();
        decode(json!({ "items": items }))
    }

    async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentThreadsResponse, YouTubeApiError> {
        let token = page_token.unwrap_or("start");
        self.record(format!("comments:{}:{}:{}", video_id, token, max_results))?;

        let pages = self.comment_pages.get(video_id).cloned().unwrap_or_default();
        let index = match page_token {
            Some(t) => t.trim_start_matches("page-").parse::<usize>().unwrap_or(0),
            None => 0,
        };
        let items = pages.get(index).cloned().unwrap_or_default();
        let next = if index + 1 < pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };

        decode(json!({ "items": items, "nextPageToken": next }))
    }

    async fn list_videos(&self, video_id: &str) -> Result<VideoListResponse, YouTubeApiError> {
        self.record(format!("videos:{}", video_id))?;
        let items: Vec<Value> = self.videos.get(video_id).cloned().into_iter().collect();
        decode(json!({ "items": items }))
    }

    async fn trending_videos(
        &self,
        region_code: &str,
        max_results: u32,
    ) -> Result<VideoListResponse, YouTubeApiError> {
        self.record(format!("trending:{}:{}", region_code, max_results))?;
        let items: Vec<Value> = self.trending.iter().take(max_results as usize).cloned().collect();
        decode(json!({ "items": items }))
    }

    async fn video_categories(
        &self,
        region_code: &str,
    ) -> Result<VideoCategoryListResponse, YouTubeApiError> {
        self.record(format!("categories:{}", region_code))?;
        decode(json!({ "items": self.categories.clone() }))
    }
}

// ============================================================================
// Fixture builders
// ============================================================================

pub fn channel_json(id: &str, title: &str, subscribers: &str, views: &str, videos: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "title": title,
            "description": format!("{} official channel", title),
            "country": "US",
            "publishedAt": "2015-03-01T12:00:00Z",
            "thumbnails": {
                "default": {"url": format!("https://yt3.ggpht.com/{}-default.jpg", id)},
                "high": {"url": format!("https://yt3.ggpht.com/{}-high.jpg", id)}
            }
        },
        "statistics": {
            "viewCount": views,
            "subscriberCount": subscribers,
            "videoCount": videos,
            "hiddenSubscriberCount": false
        },
        "contentDetails": {
            "relatedPlaylists": {"uploads": format!("UU{}", &id[2..])}
        }
    })
}

pub fn avatar_channel_json(id: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "title": format!("viewer {}", id),
            "thumbnails": {"high": {"url": format!("https://yt3.ggpht.com/{}-avatar.jpg", id)}}
        }
    })
}

pub fn comment_json(author: &str, author_channel: Option<&str>, text: &str) -> Value {
    let mut snippet = json!({
        "authorDisplayName": author,
        "textDisplay": text,
        "publishedAt": "2024-05-01T10:00:00Z"
    });
    if let Some(channel) = author_channel {
        snippet["authorChannelId"] = json!({ "value": channel });
    }

    json!({
        "id": format!("thread-{}", author),
        "snippet": {
            "topLevelComment": {"id": format!("comment-{}", author), "snippet": snippet},
            "totalReplyCount": 0
        }
    })
}

pub fn video_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "title": title,
            "description": format!("{} description", title),
            "publishedAt": "2024-04-30T08:00:00Z",
            "thumbnails": {"high": {"url": format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id)}}
        },
        "statistics": {"viewCount": "1500", "likeCount": "120", "commentCount": "3"}
    })
}

pub fn playlist_item_json(published_at: &str) -> Value {
    json!({ "snippet": { "publishedAt": published_at, "title": "upload" } })
}
