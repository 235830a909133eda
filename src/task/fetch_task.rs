//! Typed fetch tasks
//!
//! A task's payload is both the callback discriminator and the carried
//! context: a follow-up response is correlated to the partial record it
//! completes solely through the payload, never through arrival order.

use crate::model::{Comment, ContentField, Profile, Tweet};

/// Task priorities (lower values are fetched sooner)
pub mod priority {
    /// Fetches that complete an in-flight record or open a user's timeline
    pub const HIGH: u32 = 0;
    /// Regular listing pages and secondary lookups
    pub const DEFAULT: u32 = 10;
}

/// The callback discriminator and carried context of a fetch task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPayload {
    /// Seed entry: a user's profile info page
    ProfileInfo,
    /// Counts page completing a partial profile
    ProfileCounts { profile: Profile },
    /// A page of a user's timeline
    Timeline,
    /// Full-content page completing a truncated post
    FullContent { tweet: Tweet, field: ContentField },
    /// A page of a post's comment thread
    CommentThread { tweet_url: String },
    /// Secondary lookup resolving a commenter's numeric id
    CommentAuthor { comment: Comment, handle: String },
    /// A page of a user's follow listing
    FollowList,
    /// A page of a user's fan listing
    FanList,
}

/// A unit of work for the fetch substrate
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTask {
    pub url: String,
    pub payload: TaskPayload,
    /// Lower values are fetched sooner
    pub priority: u32,
    /// When false the scheduler must not de-duplicate this URL
    pub dedupe: bool,
}

impl FetchTask {
    /// A deduplicated task at default priority
    pub fn new(url: String, payload: TaskPayload) -> Self {
        Self {
            url,
            payload,
            priority: priority::DEFAULT,
            dedupe: true,
        }
    }
}
