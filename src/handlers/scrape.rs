// URL-driven scraping: dispatch a pasted YouTube URL to the channel or video payload

use crate::error::ApiError;
use crate::handlers::{channel::channel_summary, video::video_details};
use crate::models::youtube::{ScrapeRequest, ScrapeResponse};
use crate::resolver::resolve_reference;
use crate::url_parser::{parse_youtube_url, YouTubeTarget};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Json,
    routing::post,
    Router,
};
use std::sync::Arc;

pub fn scrape_routes() -> Router {
    Router::new().route("/scrape", post(scrape_url))
}

/// POST /scrape  {"url": "https://www.youtube.com/@handle"}
pub async fn scrape_url(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidInput("URL is required".to_string()))?;

    tracing::info!("🔗 Scrape request for {}", url);

    let response = match parse_youtube_url(&url)? {
        YouTubeTarget::Channel(reference) => {
            let channel_id = resolve_reference(state.platform.as_ref(), &reference).await?;
            ScrapeResponse::Channel(channel_summary(&state, &channel_id).await?)
        }
        YouTubeTarget::Video(video_id) => {
            ScrapeResponse::Video(video_details(&state, &video_id).await?)
        }
    };

    Ok(Json(response))
}
