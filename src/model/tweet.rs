//! Post record and its content-resolution key

use chrono::NaiveDateTime;

/// Which content field a full-content follow-up must fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    Content,
    OriginalContent,
}

/// A single post from a user's timeline
///
/// For an original post only `content` is set. For a repost `content`
/// carries the repost reason and `original_content` the quoted post's
/// text. Either field may start out `None` when the listing showed a
/// truncated body; the full-content follow-up re-emits the record with
/// the field filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    /// Composite identity `{user_id}_{token}`
    pub id: String,
    pub user_id: u64,
    /// Permalink of the post
    pub url: String,
    pub created_at: NaiveDateTime,
    pub like_count: u32,
    pub repost_count: u32,
    pub comment_count: u32,
    pub content: Option<String>,
    pub original_content: Option<String>,
    pub crawl_time: i64,
}

impl Tweet {
    /// Builds the composite identity from author id and permalink token
    pub fn identity(user_id: u64, token: &str) -> String {
        format!("{}_{}", user_id, token)
    }

    /// Writes `text` into the field a follow-up task designated
    pub fn set_field(&mut self, field: ContentField, text: String) {
        match field {
            ContentField::Content => self.content = Some(text),
            ContentField::OriginalContent => self.original_content = Some(text),
        }
    }
}
