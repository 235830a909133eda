//! SQLite sink implementation

use crate::model::{Comment, Profile, Relationship, Tweet};
use crate::storage::schema;
use crate::storage::traits::{RecordSink, SinkResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::path::Path;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sink writing records into a SQLite database
///
/// Every write is an upsert keyed by the record's identity, so re-emitted
/// records (resolved content, resolved author ids) overwrite in place.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Opens (or creates) the database at `path` and ensures the schema
    pub fn open(path: &Path) -> SinkResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// An in-memory sink, used by tests
    pub fn in_memory() -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Direct access to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn format_time(at: NaiveDateTime) -> String {
    at.format(TIME_FORMAT).to_string()
}

impl RecordSink for SqliteSink {
    fn upsert_profile(&mut self, profile: &Profile) -> SinkResult<()> {
        self.conn.execute(
            "INSERT INTO profiles (
                id, nick_name, gender, province, city, brief_introduction,
                birthday, sex_orientation, sentiment, vip_level,
                authentication, labels, tweet_count, follow_count, fan_count,
                crawl_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            ON CONFLICT(id) DO UPDATE SET
                nick_name = excluded.nick_name,
                gender = excluded.gender,
                province = excluded.province,
                city = excluded.city,
                brief_introduction = excluded.brief_introduction,
                birthday = excluded.birthday,
                sex_orientation = excluded.sex_orientation,
                sentiment = excluded.sentiment,
                vip_level = excluded.vip_level,
                authentication = excluded.authentication,
                labels = excluded.labels,
                tweet_count = excluded.tweet_count,
                follow_count = excluded.follow_count,
                fan_count = excluded.fan_count,
                crawl_time = excluded.crawl_time",
            params![
                profile.id as i64,
                profile.nick_name,
                profile.gender,
                profile.province,
                profile.city,
                profile.brief_introduction,
                profile.birthday,
                profile.sex_orientation.map(|o| o.as_str()),
                profile.sentiment,
                profile.vip_level,
                profile.authentication,
                profile.labels,
                profile.tweet_count.map(|c| c as i64),
                profile.follow_count.map(|c| c as i64),
                profile.fan_count.map(|c| c as i64),
                profile.crawl_time,
            ],
        )?;
        Ok(())
    }

    fn upsert_tweet(&mut self, tweet: &Tweet) -> SinkResult<()> {
        self.conn.execute(
            "INSERT INTO tweets (
                id, user_id, url, created_at, like_count, repost_count,
                comment_count, content, original_content, crawl_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                url = excluded.url,
                created_at = excluded.created_at,
                like_count = excluded.like_count,
                repost_count = excluded.repost_count,
                comment_count = excluded.comment_count,
                content = excluded.content,
                original_content = excluded.original_content,
                crawl_time = excluded.crawl_time",
            params![
                tweet.id,
                tweet.user_id as i64,
                tweet.url,
                format_time(tweet.created_at),
                tweet.like_count,
                tweet.repost_count,
                tweet.comment_count,
                tweet.content,
                tweet.original_content,
                tweet.crawl_time,
            ],
        )?;
        Ok(())
    }

    fn upsert_comment(&mut self, comment: &Comment) -> SinkResult<()> {
        self.conn.execute(
            "INSERT INTO comments (
                id, tweet_url, content, created_at, user_id, crawl_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                tweet_url = excluded.tweet_url,
                content = excluded.content,
                created_at = excluded.created_at,
                user_id = excluded.user_id,
                crawl_time = excluded.crawl_time",
            params![
                comment.id,
                comment.tweet_url,
                comment.content,
                format_time(comment.created_at),
                comment.user_id.map(|id| id as i64),
                comment.crawl_time,
            ],
        )?;
        Ok(())
    }

    fn upsert_relationship(&mut self, relationship: &Relationship) -> SinkResult<()> {
        self.conn.execute(
            "INSERT INTO relationships (id, follower_id, followed_id, crawl_time)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET crawl_time = excluded.crawl_time",
            params![
                relationship.id(),
                relationship.follower_id as i64,
                relationship.followed_id as i64,
                relationship.crawl_time,
            ],
        )?;
        Ok(())
    }
}
