// Video handlers: details with top comments, trending listing, categories

use crate::comments::top_comments;
use crate::error::ApiError;
use crate::models::youtube::{
    CategoriesResponse, RegionQuery, TrendingResponse, TrendingVideo, VideoCategory, VideoResponse,
};
use crate::AppState;
use axum::{
    extract::{Extension, Path, Query},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

const DEFAULT_REGION: &str = "US";
const DEFAULT_TRENDING_RESULTS: u32 = 10;
const MAX_TRENDING_RESULTS: u32 = 50;

pub fn video_routes() -> Router {
    Router::new()
        .route("/api/video/trending", get(get_trending_videos))
        .route("/api/video/categories", get(get_video_categories))
        .route("/api/video/:video_id", get(get_video))
}

/// Get video details and top comments
///
/// GET /api/video/:video_id
pub async fn get_video(
    Path(video_id): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<VideoResponse>, ApiError> {
    Ok(Json(video_details(&state, &video_id).await?))
}

pub async fn video_details(state: &AppState, video_id: &str) -> Result<VideoResponse, ApiError> {
    let platform = state.platform.as_ref();

    let item = platform
        .list_videos(video_id)
        .await?
        .items
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    let comments = top_comments(platform, video_id, state.comment_limit).await?;

    tracing::info!("🎬 Video {} loaded with {} comments", video_id, comments.len());

    VideoResponse::from_video(item, comments)
}

fn region_or_default(region: Option<String>) -> String {
    region
        .map(|r| r.trim().to_uppercase())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

/// Get trending videos for a region
///
/// GET /api/video/trending?regionCode=US&maxResults=10
pub async fn get_trending_videos(
    Query(params): Query<RegionQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<TrendingResponse>, ApiError> {
    let max_results = match params.max_results.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ApiError::InvalidInput(format!("Invalid maxResults: {}", raw)))?,
        None => DEFAULT_TRENDING_RESULTS,
    }
    .clamp(1, MAX_TRENDING_RESULTS);

    let region_code = region_or_default(params.region_code);

    let response = state
        .platform
        .trending_videos(&region_code, max_results)
        .await?;

    let trending_videos: Vec<TrendingVideo> =
        response.items.into_iter().map(TrendingVideo::from).collect();

    Ok(Json(TrendingResponse {
        region_code,
        trending_videos,
    }))
}

/// Get video categories for a region
///
/// GET /api/video/categories?regionCode=US
pub async fn get_video_categories(
    Query(params): Query<RegionQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let region_code = region_or_default(params.region_code);

    let response = state.platform.video_categories(&region_code).await?;
    let categories: Vec<VideoCategory> =
        response.items.into_iter().map(VideoCategory::from).collect();

    Ok(Json(CategoriesResponse {
        region_code,
        categories,
    }))
}

#[cfg(test)]
mod tests {
    use crate::cache::ChannelCache;
    use crate::handlers::test_support::{get, router_with};
    use crate::testing::{avatar_channel_json, comment_json, video_json, FakePlatform};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_video_with_comments() {
        let mut fake = FakePlatform::new();
        fake.videos
            .insert("dQw4w9WgXcQ".to_string(), video_json("dQw4w9WgXcQ", "Never Gonna"));
        fake.channels
            .insert("UCfan".to_string(), avatar_channel_json("UCfan"));
        fake.comment_pages.insert(
            "dQw4w9WgXcQ".to_string(),
            vec![vec![
                comment_json("fan", Some("UCfan"), "classic"),
                comment_json("lurker", None, "hi"),
                comment_json("critic", Some("UCmissing"), "meh"),
            ]],
        );
        let router = router_with(Arc::new(fake), ChannelCache::disabled());

        let (status, body) = get(router, "/api/video/dQw4w9WgXcQ").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["video_title"], "Never Gonna");
        assert_eq!(body["view_count"], "1500");
        assert_eq!(body["thumbnail"], "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg");

        let comments = body["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0]["username"], "fan");
        assert_eq!(comments[0]["profile_picture"], "https://yt3.ggpht.com/UCfan-avatar.jpg");
        assert_eq!(comments[1]["profile_picture"], serde_json::Value::Null);
        assert_eq!(comments[2]["profile_picture"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_video_not_found() {
        let router = router_with(Arc::new(FakePlatform::new()), ChannelCache::disabled());
        let (status, body) = get(router, "/api/video/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Video not found");
    }

    #[tokio::test]
    async fn test_trending_defaults() {
        let mut fake = FakePlatform::new();
        fake.trending = (0..12)
            .map(|i| video_json(&format!("vid{}", i), &format!("Trending {}", i)))
            .collect();
        let fake = Arc::new(fake);
        let router = router_with(fake.clone(), ChannelCache::disabled());

        let (status, body) = get(router, "/api/video/trending").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["region_code"], "US");
        assert_eq!(body["trending_videos"].as_array().unwrap().len(), 10);
        assert_eq!(body["trending_videos"][0]["video_id"], "vid0");
        assert_eq!(fake.calls(), vec!["trending:US:10"]);
    }

    #[tokio::test]
    async fn test_trending_region_and_limit() {
        let fake = Arc::new(FakePlatform::new());
        let router = router_with(fake.clone(), ChannelCache::disabled());

        let (status, _) = get(router.clone(), "/api/video/trending?regionCode=gb&maxResults=500").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fake.calls(), vec!["trending:GB:50"]);

        let (status, _) = get(router, "/api/video/trending?maxResults=lots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_categories() {
        let mut fake = FakePlatform::new();
        fake.categories = vec![
            json!({"id": "10", "snippet": {"title": "Music", "assignable": true}}),
            json!({"id": "30", "snippet": {"title": "Movies", "assignable": false}}),
        ];
        let router = router_with(Arc::new(fake), ChannelCache::disabled());

        let (status, body) = get(router, "/api/video/categories?regionCode=DE").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["region_code"], "DE");
        assert_eq!(
            body["categories"],
            json!([
                {"category_id": "10", "title": "Music", "assignable": true},
                {"category_id": "30", "title": "Movies", "assignable": false}
            ])
        );
    }

    #[tokio::test]
    async fn test_categories_quota() {
        let fake = FakePlatform::new().fail_with("categories:", 429, "rateLimitExceeded");
        let router = router_with(Arc::new(fake), ChannelCache::disabled());

        let (status, _) = get(router, "/api/video/categories").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }
}
