//! Record types emitted by the extractors
//!
//! Records may be emitted more than once for the same identity as in-flight
//! fields resolve; sinks upsert by identity rather than append.

mod comment;
mod profile;
mod relationship;
mod tweet;

pub use comment::Comment;
pub use profile::{Profile, SexOrientation};
pub use relationship::Relationship;
pub use tweet::{ContentField, Tweet};

/// Any record produced by an extractor
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Profile(Profile),
    Tweet(Tweet),
    Comment(Comment),
    Relationship(Relationship),
}

impl Record {
    /// The identity a sink upserts by
    pub fn identity(&self) -> String {
        match self {
            Record::Profile(profile) => profile.id.to_string(),
            Record::Tweet(tweet) => tweet.id.clone(),
            Record::Comment(comment) => comment.id.clone(),
            Record::Relationship(relationship) => relationship.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_identity() {
        let relationship = Relationship {
            follower_id: 55,
            followed_id: 99,
            crawl_time: 0,
        };
        assert_eq!(Record::Relationship(relationship).identity(), "55-99");

        let profile = Profile::new(42, 0);
        assert_eq!(Record::Profile(profile).identity(), "42");
    }
}
