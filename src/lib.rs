// lib.rs - YouTube channel/video insights proxy
pub mod analytics;
pub mod cache;
pub mod comments;
pub mod config;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod resolver;
pub mod url_parser;
pub mod youtube_client;

#[cfg(test)]
pub(crate) mod testing;

use axum::{
    http::{HeaderValue, Method},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::cache::ChannelCache;
use crate::config::AppConfig;
use crate::youtube_client::VideoPlatform;

// AppState holds the upstream platform client and the channel cache
pub struct AppState {
    pub platform: Arc<dyn VideoPlatform>,
    pub channel_cache: ChannelCache,
    pub comment_limit: usize,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(platform: Arc<dyn VideoPlatform>, channel_cache: ChannelCache, comment_limit: usize) -> Self {
        Self {
            platform,
            channel_cache,
            comment_limit,
            started_at: chrono::Utc::now(),
        }
    }
}

/// API routes plus request logging, without CORS or static files.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::channel::channel_routes())
        .merge(handlers::video::video_routes())
        .merge(handlers::scrape::scrape_routes())
        .merge(handlers::status::status_routes())
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(Extension(state))
}

/// Full application: API, bundled UI (when present) and CORS policy.
pub fn app(state: Arc<AppState>, config: &AppConfig) -> Router {
    let mut router = api_router(state);

    if config.static_dir.is_dir() {
        let index = config.static_dir.join("index.html");
        tracing::info!("Serving static UI from {}", config.static_dir.display());
        router = router.fallback_service(
            ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)),
        );
    } else {
        tracing::warn!(
            "Static directory {} not found. UI serving disabled.",
            config.static_dir.display()
        );
    }

    router.layer(cors_layer(config))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
