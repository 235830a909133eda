//! Sink trait and error types

use crate::model::{Comment, Profile, Record, Relationship, Tweet};
use thiserror::Error;

/// Errors that can occur while persisting records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Sink consuming emitted records
///
/// Records for the same identity may arrive more than once as in-flight
/// fields resolve (a truncated post re-emitted with its full content);
/// implementations must upsert by identity, never append.
pub trait RecordSink: Send {
    fn upsert_profile(&mut self, profile: &Profile) -> SinkResult<()>;

    fn upsert_tweet(&mut self, tweet: &Tweet) -> SinkResult<()>;

    fn upsert_comment(&mut self, comment: &Comment) -> SinkResult<()>;

    fn upsert_relationship(&mut self, relationship: &Relationship) -> SinkResult<()>;

    /// Routes a record to the matching upsert
    fn upsert(&mut self, record: &Record) -> SinkResult<()> {
        match record {
            Record::Profile(profile) => self.upsert_profile(profile),
            Record::Tweet(tweet) => self.upsert_tweet(tweet),
            Record::Comment(comment) => self.upsert_comment(comment),
            Record::Relationship(relationship) => self.upsert_relationship(relationship),
        }
    }

    /// Flushes any buffered writes; called once when a run finishes
    fn flush(&mut self) -> SinkResult<()> {
        Ok(())
    }
}
