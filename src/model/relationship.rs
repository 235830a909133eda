//! Directed follow edge

/// A directed edge: `follower_id` follows `followed_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub follower_id: u64,
    pub followed_id: u64,
    pub crawl_time: i64,
}

impl Relationship {
    /// Identity: ordered concatenation of both ids
    pub fn id(&self) -> String {
        format!("{}-{}", self.follower_id, self.followed_id)
    }
}
