//! Response dispatch
//!
//! Matches a fetched response back to the extractor its task payload
//! designates. The payload is consumed here: partial records carried by a
//! follow-up task move into the extractor that completes them.

use crate::extract::{
    extract_comments, extract_fan_list, extract_follow_list, extract_profile_counts,
    extract_profile_info, extract_timeline, resolve_comment_author, resolve_full_content,
    ExtractContext, Extraction,
};
use crate::task::{FetchTask, TaskPayload};
use crate::ExtractResult;

/// Routes a fetched response body to the matching extractor
pub fn dispatch(task: FetchTask, body: &str, ctx: &ExtractContext) -> ExtractResult<Extraction> {
    match task.payload {
        TaskPayload::ProfileInfo => extract_profile_info(body, &task.url, ctx),
        TaskPayload::ProfileCounts { profile } => extract_profile_counts(body, profile, ctx),
        TaskPayload::Timeline => extract_timeline(body, &task.url, ctx),
        TaskPayload::FullContent { tweet, field } => resolve_full_content(body, tweet, field),
        TaskPayload::CommentThread { tweet_url } => {
            extract_comments(body, &task.url, &tweet_url, ctx)
        }
        TaskPayload::CommentAuthor { comment, handle } => {
            resolve_comment_author(body, &task.url, comment, handle, ctx)
        }
        TaskPayload::FollowList => extract_follow_list(body, &task.url, ctx),
        TaskPayload::FanList => extract_fan_list(body, &task.url, ctx),
    }
}
