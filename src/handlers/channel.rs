// Channel profile handler: identifier resolution, details and derived analytics

use crate::analytics::{channel_playlists, channel_upload_frequency, engagement_rate};
use crate::error::ApiError;
use crate::models::youtube::{ChannelAnalytics, ChannelResponse};
use crate::resolver::{is_valid_channel_identifier, resolve_channel_id};
use crate::youtube_client::ChannelStatistics;
use crate::AppState;
use axum::{
    extract::{Extension, Path},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;

const CHANNEL_PARTS: &str = "snippet,statistics,contentDetails,brandingSettings";

pub fn channel_routes() -> Router {
    Router::new().route("/api/channel/:identifier", get(get_channel))
}

/// Get channel details and analytics by id, handle, or channel URL
///
/// GET /api/channel/:identifier
pub async fn get_channel(
    Path(identifier): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ChannelResponse>, ApiError> {
    if !is_valid_channel_identifier(&identifier) {
        return Err(ApiError::InvalidInput("Invalid channel identifier".to_string()));
    }

    let channel_id = resolve_channel_id(state.platform.as_ref(), &identifier).await?;
    let response = channel_summary(&state, &channel_id).await?;

    Ok(Json(response))
}

/// Build the channel payload for a canonical id, consulting the cache first.
pub async fn channel_summary(state: &AppState, channel_id: &str) -> Result<ChannelResponse, ApiError> {
    if let Some(cached) = state.channel_cache.get(channel_id).await {
        tracing::debug!("Channel cache hit for {}", channel_id);
        return Ok(cached);
    }

    let platform = state.platform.as_ref();

    let item = platform
        .list_channels(channel_id, CHANNEL_PARTS)
        .await?
        .items
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound("Channel not found".to_string()))?;

    let uploads_playlist = item
        .content_details
        .as_ref()
        .and_then(|c| c.related_playlists.as_ref())
        .and_then(|p| p.uploads.clone());

    let engagement = match &item.statistics {
        Some(stats) => engagement_rate(stats),
        None => engagement_rate(&ChannelStatistics::default()),
    };

    let analytics = ChannelAnalytics {
        upload_frequency: channel_upload_frequency(platform, uploads_playlist.as_deref()).await,
        playlists: channel_playlists(platform, &item.id).await,
        engagement_rate: engagement,
    };

    let response = ChannelResponse::from_channel(item, analytics)?;

    tracing::info!(
        "📺 Built channel profile for {} ({})",
        response.channel_name,
        response.channel_id
    );

    state
        .channel_cache
        .insert(channel_id.to_string(), response.clone())
        .await;

    Ok(response)
}
