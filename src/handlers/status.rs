// Service status endpoint
use crate::AppState;
use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::json;
use std::sync::Arc;

pub fn status_routes() -> Router {
    Router::new().route("/api/status", get(api_status))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    let uptime = chrono::Utc::now().signed_duration_since(state.started_at);

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime.num_seconds(),
        "services": {
            "youtube_data_api": "configured",
            "channel_cache": if state.channel_cache.is_enabled() { "enabled" } else { "disabled" }
        },
        "settings": {
            "comment_limit": state.comment_limit
        },
        "endpoints": {
            "channel": "/api/channel/:identifier",
            "video": "/api/video/:video_id",
            "trending": "/api/video/trending",
            "categories": "/api/video/categories",
            "scrape": "/scrape",
            "status": "/api/status"
        }
    }))
}
