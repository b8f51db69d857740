use channel_insights::{
    cache::ChannelCache, config::AppConfig, youtube_client::YouTubeClient, AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        tracing::error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let youtube_client = YouTubeClient::new(
        config.api_key.clone(),
        &config.youtube_base_url,
        config.request_timeout,
    )?;
    tracing::info!("📺 YouTube Data API client ready ({})", config.youtube_base_url);

    let channel_cache = ChannelCache::new(config.cache_capacity, config.cache_ttl);

    tracing::info!(
        "CORS origins: {}",
        if config.allows_any_origin() { "*".to_string() } else { config.allowed_origins.join(", ") }
    );

    let state = Arc::new(AppState::new(
        Arc::new(youtube_client),
        channel_cache,
        config.comment_limit,
    ));

    let app = channel_insights::app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>()).await?;

    Ok(())
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,channel_insights=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,channel_insights=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("📊 Channel Insights starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Build mode: {}", if cfg!(debug_assertions) { "development" } else { "production" });
    tracing::info!("Log level: {}", log_level);

    Ok(())
}
