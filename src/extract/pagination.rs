//! Pagination planning for listing pages
//!
//! Every paginated listing (timeline, follows, fans, comment threads)
//! renders a `1/N页` indicator on its first page. The planner turns that
//! single response into the remaining page fetches up front; later pages
//! never re-plan.

use crate::task::{FetchTask, TaskPayload};
use regex::Regex;
use std::sync::LazyLock;

static PAGE_INDICATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/>&nbsp;1/(\d+)页</div>").unwrap());

/// Expands a first-page response into tasks for pages 2..=N
///
/// Returns no tasks when the URL is not a first page, when the indicator
/// is absent (single-page listing) or when the page count does not parse;
/// an unreadable indicator is never fatal. Each produced task carries a
/// clone of the first page's payload so later pages keep the same context,
/// and opts out of URL de-duplication.
pub fn plan_pages(
    body: &str,
    first_page_url: &str,
    payload: &TaskPayload,
    priority: u32,
) -> Vec<FetchTask> {
    if !first_page_url.ends_with("page=1") {
        return Vec::new();
    }
    let Some(caps) = PAGE_INDICATOR.captures(body) else {
        return Vec::new();
    };
    let Ok(total) = caps[1].parse::<u32>() else {
        return Vec::new();
    };
    (2..=total)
        .map(|page| FetchTask {
            url: first_page_url.replace("page=1", &format!("page={page}")),
            payload: payload.clone(),
            priority,
            dedupe: false,
        })
        .collect()
}
