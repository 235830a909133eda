//! Page extractors
//!
//! Every extractor is a pure function of (response body, response URL,
//! carried context) producing records and follow-up tasks. The only shared
//! state any of them touch is the injected [`UserIdCache`].

mod comment;
mod full_content;
mod pagination;
mod profile;
mod relationship;
mod time;
mod tweet;

pub use comment::{extract_comments, resolve_comment_author};
pub use full_content::resolve_full_content;
pub use pagination::plan_pages;
pub use profile::{extract_profile_counts, extract_profile_info};
pub use relationship::{extract_fan_list, extract_follow_list};
pub use time::{normalize_time, CrawlClock};
pub use tweet::extract_timeline;

use crate::model::Record;
use crate::task::{FetchTask, UserIdCache};

/// Shared inputs of one extraction call
#[derive(Clone, Copy)]
pub struct ExtractContext<'a> {
    /// Site root every follow-up URL is built against
    pub base_url: &'a str,
    pub clock: CrawlClock,
    pub cache: &'a UserIdCache,
}

/// Records and follow-up tasks produced from one response
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub tasks: Vec<FetchTask>,
}
