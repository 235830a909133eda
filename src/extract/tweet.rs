//! Timeline extraction
//!
//! Each `div.c[id]` block on a timeline page is one post. A block that does
//! not match the expected shape is skipped with a logged error; it never
//! aborts the rest of the page.

use crate::dom::{content_nodes, element_text, reconstruct, selector, NodeKind, ReconstructRules};
use crate::extract::{normalize_time, plan_pages, ExtractContext, Extraction};
use crate::model::{ContentField, Record, Tweet};
use crate::task::{priority, FetchTask, TaskPayload};
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

static RE_PERMALINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/repost/(.*?)\?uid=(\d+)").unwrap());
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

const LIKE_MARKER: &str = "赞[";
const REPOST_MARKER: &str = "转发[";
const COMMENT_MARKER: &str = "评论[";
const FULL_TEXT_EXCLUDE: &str = "原文";
const LIKE_PREFIX: &str = "赞";
const FULL_TEXT_LINK: &str = "全文";
const TRUNCATION_QUERY: &str = "ckAll=1";
const REPOST_LABEL: &str = "转发理由:";
const SOURCE_DEVICE_MARKER: &str = "来自";

/// Parses one timeline page into post records and their follow-up fetches
pub fn extract_timeline(
    body: &str,
    url: &str,
    ctx: &ExtractContext,
) -> ExtractResult<Extraction> {
    let document = Html::parse_document(body);
    let mut out = Extraction::default();

    let block_selector = selector("div.c[id]");
    for block in document.select(&block_selector) {
        match extract_post_block(block, ctx) {
            Ok(post) => {
                out.records.extend(post.records);
                out.tasks.extend(post.tasks);
            }
            Err(e) => {
                let id = block.value().attr("id").unwrap_or("?");
                tracing::error!("skipping post {} on {}: {}", id, url, e);
            }
        }
    }

    out.tasks
        .extend(plan_pages(body, url, &TaskPayload::Timeline, priority::DEFAULT));
    Ok(out)
}

fn extract_post_block(block: ElementRef, ctx: &ExtractContext) -> ExtractResult<Extraction> {
    let anchors: Vec<ElementRef> = block.select(&selector("a")).collect();

    // Permalink, author id and post token come from the repost action link.
    let repost_href = anchors
        .iter()
        .find(|a| element_text(**a).contains(REPOST_MARKER))
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| missing("repost action link", block))?;
    let caps = RE_PERMALINK
        .captures(repost_href)
        .ok_or_else(|| ExtractError::Permalink {
            href: repost_href.to_string(),
        })?;
    let token = caps[1].to_string();
    let user_id: u64 = caps[2].parse().map_err(|_| ExtractError::Permalink {
        href: repost_href.to_string(),
    })?;
    let tweet_url = format!("{}/{}/{}", ctx.base_url, user_id, token);

    let meta_text = block
        .select(&selector("span.ct"))
        .last()
        .map(element_text)
        .ok_or_else(|| missing("meta span", block))?;
    let raw_time = match meta_text.split_once(SOURCE_DEVICE_MARKER) {
        Some((before, _)) => before.trim(),
        None => meta_text.trim(),
    };
    let created_at = normalize_time(raw_time, ctx.clock.anchor)?;

    let like_count = action_count(&anchors, LIKE_MARKER, None)?;
    let repost_count = action_count(&anchors, REPOST_MARKER, None)?;
    let comment_count = action_count(&anchors, COMMENT_MARKER, Some(FULL_TEXT_EXCLUDE))?;

    let divs: Vec<ElementRef> = block.select(&selector("div")).collect();
    let last_div_nodes = divs.last().map(|div| content_nodes(*div)).unwrap_or_default();
    let is_repost = divs.len() > 1
        && last_div_nodes
            .first()
            .is_some_and(|node| node.kind == NodeKind::Span && node.text.trim() == REPOST_LABEL);

    let mut tweet = Tweet {
        id: Tweet::identity(user_id, &token),
        user_id,
        url: tweet_url.clone(),
        created_at,
        like_count,
        repost_count,
        comment_count,
        content: None,
        original_content: None,
        crawl_time: ctx.clock.unix,
    };

    if is_repost {
        let reason = reconstruct(
            &last_div_nodes,
            &ReconstructRules {
                skip: 1,
                stop_prefixes: &[LIKE_PREFIX],
                ..Default::default()
            },
        );
        tweet.content = Some(reason);
    }
    let field = if is_repost {
        ContentField::OriginalContent
    } else {
        ContentField::Content
    };

    let mut out = Extraction::default();

    let full_href = anchors.iter().find_map(|a| {
        let href = a.value().attr("href")?;
        (element_text(*a).trim() == FULL_TEXT_LINK && href.contains(TRUNCATION_QUERY))
            .then(|| href.to_string())
    });
    if let Some(href) = full_href {
        // Truncated body: emit the partial record now and let the
        // full-content page fill the designated field.
        out.tasks.push(FetchTask {
            url: format!("{}{}", ctx.base_url, href),
            payload: TaskPayload::FullContent {
                tweet: tweet.clone(),
                field,
            },
            priority: priority::HIGH,
            dedupe: true,
        });
        out.records.push(Record::Tweet(tweet));
    } else {
        let first_div_nodes = divs
            .first()
            .map(|div| content_nodes(*div))
            .unwrap_or_default();
        let text = reconstruct(
            &first_div_nodes,
            &ReconstructRules {
                skip: usize::from(is_repost),
                stop_prefixes: &[LIKE_PREFIX],
                stop_on_links: true,
                descend_tails: true,
                ..Default::default()
            },
        );
        tweet.set_field(field, text);
        out.records.push(Record::Tweet(tweet));
    }

    out.tasks.push(FetchTask {
        url: format!("{}/comment/{}?page=1", ctx.base_url, token),
        payload: TaskPayload::CommentThread {
            tweet_url,
        },
        priority: priority::DEFAULT,
        dedupe: true,
    });

    Ok(out)
}

/// Reads the bracketed number from the last action link containing `marker`
fn action_count(
    anchors: &[ElementRef],
    marker: &str,
    exclude: Option<&str>,
) -> ExtractResult<u32> {
    let text = anchors
        .iter()
        .rev()
        .map(|a| element_text(*a))
        .find(|text| {
            text.contains(marker) && exclude.is_none_or(|excluded| !text.contains(excluded))
        })
        .ok_or_else(|| ExtractError::Missing {
            what: "action counter link",
            context: marker.to_string(),
        })?;
    RE_DIGITS
        .find(&text)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or(ExtractError::Counter { text })
}

fn missing(what: &'static str, block: ElementRef) -> ExtractError {
    ExtractError::Missing {
        what,
        context: block.value().attr("id").unwrap_or("?").to_string(),
    }
}
