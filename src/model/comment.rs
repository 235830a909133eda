//! Comment record

use chrono::NaiveDateTime;

/// One comment from a post's comment thread
///
/// `user_id` may require a secondary lookup; a comment is emitted only once
/// its author id is resolved, so sinks never see a `None` author from the
/// reference crawl loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Native element id of the comment block
    pub id: String,
    /// Permalink of the commented post
    pub tweet_url: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub user_id: Option<u64>,
    pub crawl_time: i64,
}
