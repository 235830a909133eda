//! SQLite schema definitions

use rusqlite::Connection;

const CREATE_PROFILES: &str = "
CREATE TABLE IF NOT EXISTS profiles (
    id INTEGER PRIMARY KEY,
    nick_name TEXT,
    gender TEXT,
    province TEXT,
    city TEXT,
    brief_introduction TEXT,
    birthday TEXT,
    sex_orientation TEXT,
    sentiment TEXT,
    vip_level TEXT,
    authentication TEXT,
    labels TEXT,
    tweet_count INTEGER,
    follow_count INTEGER,
    fan_count INTEGER,
    crawl_time INTEGER NOT NULL
)";

const CREATE_TWEETS: &str = "
CREATE TABLE IF NOT EXISTS tweets (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL,
    url TEXT NOT NULL,
    created_at TEXT NOT NULL,
    like_count INTEGER NOT NULL,
    repost_count INTEGER NOT NULL,
    comment_count INTEGER NOT NULL,
    content TEXT,
    original_content TEXT,
    crawl_time INTEGER NOT NULL
)";

const CREATE_COMMENTS: &str = "
CREATE TABLE IF NOT EXISTS comments (
    id TEXT PRIMARY KEY,
    tweet_url TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    user_id INTEGER,
    crawl_time INTEGER NOT NULL
)";

const CREATE_RELATIONSHIPS: &str = "
CREATE TABLE IF NOT EXISTS relationships (
    id TEXT PRIMARY KEY,
    follower_id INTEGER NOT NULL,
    followed_id INTEGER NOT NULL,
    crawl_time INTEGER NOT NULL
)";

const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS idx_tweets_user ON tweets(user_id);
CREATE INDEX IF NOT EXISTS idx_comments_tweet ON comments(tweet_url);
CREATE INDEX IF NOT EXISTS idx_relationships_follower ON relationships(follower_id);
CREATE INDEX IF NOT EXISTS idx_relationships_followed ON relationships(followed_id);
";

/// Creates all tables and indexes if they do not exist
pub fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_PROFILES)?;
    conn.execute_batch(CREATE_TWEETS)?;
    conn.execute_batch(CREATE_COMMENTS)?;
    conn.execute_batch(CREATE_RELATIONSHIPS)?;
    conn.execute_batch(CREATE_INDEXES)?;
    Ok(())
}
