// Bounded in-memory cache of shaped channel payloads
use moka::future::Cache;
use std::time::Duration;

use crate::models::youtube::ChannelResponse;

/// Channel payloads keyed by canonical channel id.
///
/// Size-limited with a time-to-live; a zero TTL disables caching.
#[derive(Clone)]
pub struct ChannelCache {
    inner: Option<Cache<String, ChannelResponse>>,
}

impl ChannelCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        if capacity == 0 || ttl.is_zero() {
            tracing::info!("Channel cache disabled");
            return Self::disabled();
        }

        let inner = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        tracing::info!(
            "Channel cache ready ({} entries, {}s TTL)",
            capacity,
            ttl.as_secs()
        );

        Self { inner: Some(inner) }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn get(&self, channel_id: &str) -> Option<ChannelResponse> {
        match &self.inner {
            Some(cache) => cache.get(channel_id).await,
            None => None,
        }
    }

    pub async fn insert(&self, channel_id: String, response: ChannelResponse) {
        if let Some(cache) = &self.inner {
            cache.insert(channel_id, response).await;
        }
    }
}
