// Derived channel analytics: upload frequency, engagement rate, playlists
use chrono::{DateTime, Utc};

use crate::formatting::round_to;
use crate::models::youtube::{PlaylistSummary, UploadFrequency};
use crate::youtube_client::{ChannelStatistics, VideoPlatform};

/// Most recent uploads sampled for the frequency estimate (one page).
pub const UPLOAD_SAMPLE_SIZE: u32 = 50;
pub const PLAYLIST_LIMIT: u32 = 50;

const DAYS_PER_MONTH: f64 = 30.0;

/// Estimate uploads per month from the publish times of recent uploads.
///
/// The rate is a linear extrapolation over the sampled window, not a
/// long-run average.
pub fn upload_frequency(samples: &[DateTime<Utc>]) -> UploadFrequency {
    match samples.len() {
        0 => return UploadFrequency::new("No recent uploads", 0.0),
        1 => return UploadFrequency::new("Insufficient data", 0.0),
        _ => {}
    }

    let mut dates = samples.to_vec();
    dates.sort_by(|a, b| b.cmp(a));

    // Whole days elapsed between newest and oldest
    let total_days = (dates[0] - dates[dates.len() - 1]).num_days();
    if total_days == 0 {
        return UploadFrequency::new("Multiple uploads per day", DAYS_PER_MONTH);
    }

    let uploads_per_month = dates.len() as f64 * DAYS_PER_MONTH / total_days as f64;

    let frequency = if uploads_per_month >= 30.0 {
        "Daily or more".to_string()
    } else if uploads_per_month >= 4.0 {
        format!("{:.1} times per week", round_to(uploads_per_month / 4.0, 1))
    } else {
        format!("{:.1} times per month", round_to(uploads_per_month, 1))
    };

    UploadFrequency::new(frequency, round_to(uploads_per_month, 2))
}

/// Average views per video relative to the subscriber base, in percent.
/// Zero whenever a count is missing, malformed or zero.
pub fn engagement_rate(stats: &ChannelStatistics) -> f64 {
    let parse = |raw: &Option<String>| -> Option<u64> {
        match raw {
            Some(value) => value.trim().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    let (subscribers, views, videos) = match (
        parse(&stats.subscriber_count),
        parse(&stats.view_count),
        parse(&stats.video_count),
    ) {
        (Some(s), Some(v), Some(n)) => (s, v, n),
        _ => {
            tracing::warn!("Non-numeric channel statistics, engagement rate set to 0");
            return 0.0;
        }
    };

    if subscribers == 0 || videos == 0 {
        return 0.0;
    }

    let average_views = views as f64 / videos as f64;
    round_to(average_views / subscribers as f64 * 100.0, 2)
}

/// Upload frequency for a channel, sampled from its uploads playlist.
/// Never fails: any problem degrades to "Unable to calculate".
pub async fn channel_upload_frequency(
    platform: &dyn VideoPlatform,
    uploads_playlist_id: Option<&str>,
) -> UploadFrequency {
    let unable = || UploadFrequency::new("Unable to calculate", 0.0);

    let Some(playlist_id) = uploads_playlist_id else {
        tracing::error!("Error calculating upload frequency: channel has no uploads playlist");
        return unable();
    };

    let response = match platform
        .list_playlist_items(playlist_id, UPLOAD_SAMPLE_SIZE)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error calculating upload frequency for {}: {}", playlist_id, e);
            return unable();
        }
    };

    let parsed: Result<Vec<DateTime<Utc>>, _> = response
        .items
        .iter()
        .map(|item| {
            DateTime::parse_from_rfc3339(&item.snippet.published_at).map(|d| d.with_timezone(&Utc))
        })
        .collect();

    match parsed {
        Ok(dates) => upload_frequency(&dates),
        Err(e) => {
            tracing::error!("Error parsing upload dates for {}: {}", playlist_id, e);
            unable()
        }
    }
}

/// Public playlists of a channel (first page). Failures yield an empty list.
pub async fn channel_playlists(platform: &dyn VideoPlatform, channel_id: &str) -> Vec<PlaylistSummary> {
    match platform.list_playlists(channel_id, PLAYLIST_LIMIT).await {
        Ok(response) => response.items.into_iter().map(PlaylistSummary::from).collect(),
        Err(e) => {
            tracing::error!("Error fetching playlists for channel {}: {}", channel_id, e);
            Vec::new()
        }
    }
}
