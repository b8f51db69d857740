// Top-comment gathering with best-effort commenter avatars
use crate::error::ApiError;
use crate::models::youtube::CommentEntry;
use crate::youtube_client::{CommentThread, VideoPlatform};

pub const DEFAULT_COMMENT_LIMIT: usize = 7;

/// Largest page the commentThreads endpoint will return.
const MAX_PAGE_SIZE: usize = 100;

/// Collect up to `limit` top-level comments for a video, in upstream order.
///
/// Pages are fetched one after another with the previous page's token. Each
/// commenter's avatar is looked up individually; a failed lookup only clears
/// that entry's `profile_picture`. The loop ends when `limit` entries are
/// collected or the upstream reports no further page.
pub async fn top_comments(
    platform: &dyn VideoPlatform,
    video_id: &str,
    limit: usize,
) -> Result<Vec<CommentEntry>, ApiError> {
    let mut comments: Vec<CommentEntry> = Vec::with_capacity(limit.min(MAX_PAGE_SIZE));
    let mut page_token: Option<String> = None;

    while comments.len() < limit {
        let page_size = MAX_PAGE_SIZE.min(limit - comments.len()) as u32;

        let page = match platform
            .list_comment_threads(video_id, page_token.as_deref(), page_size)
            .await
        {
            Ok(page) => page,
            Err(e) if e.reason() == Some("commentsDisabled") => {
                tracing::info!("Comments are disabled for video {}", video_id);
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let collected_before = comments.len();
        for thread in page.items {
            comments.push(enrich_comment(platform, thread).await);

            if comments.len() >= limit {
                break;
            }
        }

        // Stop on a page that added nothing
        page_token = page.next_page_token;
        if page_token.is_none() || comments.len() == collected_before {
            break;
        }
    }

    Ok(comments)
}

async fn enrich_comment(platform: &dyn VideoPlatform, thread: CommentThread) -> CommentEntry {
    let snippet = thread.snippet.top_level_comment.snippet;

    let author_channel_id = snippet
        .author_channel_id
        .and_then(|a| a.value)
        .filter(|id| !id.is_empty());

    let profile_picture = match author_channel_id {
        Some(channel_id) => commenter_avatar(platform, &channel_id).await,
        None => None,
    };

    CommentEntry {
        username: snippet.author_display_name,
        comment: snippet.text_display,
        timestamp: snippet.published_at,
        profile_picture,
    }
}

async fn commenter_avatar(platform: &dyn VideoPlatform, channel_id: &str) -> Option<String> {
    match platform.list_channels(channel_id, "snippet").await {
        Ok(response) => response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.snippet)
            .and_then(|snippet| snippet.thumbnails)
            .and_then(|thumbnails| thumbnails.high_url()),
        Err(e) => {
            tracing::warn!("Error fetching commenter profile picture for {}: {}", channel_id, e);
            None
        }
    }
}
