//! Comment-thread extraction and author-id resolution
//!
//! A commenter's numeric id is either visible directly in the author link
//! (`/u/{id}`), cached from an earlier lookup, or resolved through a
//! secondary fetch of the commenter's profile page. A comment that needs
//! the lookup rides on that task and is emitted only once resolved.

use crate::dom::{content_nodes, reconstruct, selector, NodeKind, ReconstructRules};
use crate::extract::{normalize_time, plan_pages, ExtractContext, Extraction};
use crate::model::{Comment, Record};
use crate::task::{priority, FetchTask, TaskPayload};
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

static RE_FOLLOW_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)/follow").unwrap());

const REPORT_MARKER: &str = "举报";
const FOLLOW_TEXT: &str = "关注";
const FOLLOW_PATH: &str = "/follow";

enum AuthorOutcome {
    Resolved(Comment),
    Pending(FetchTask),
}

/// Parses one comment-thread page
pub fn extract_comments(
    body: &str,
    url: &str,
    tweet_url: &str,
    ctx: &ExtractContext,
) -> ExtractResult<Extraction> {
    let document = Html::parse_document(body);
    let mut out = Extraction::default();

    let block_selector = selector(r#"div.c[id^="C_"]"#);
    for block in document.select(&block_selector) {
        match extract_comment_block(block, tweet_url, ctx) {
            Ok(AuthorOutcome::Resolved(comment)) => out.records.push(Record::Comment(comment)),
            Ok(AuthorOutcome::Pending(task)) => out.tasks.push(task),
            Err(e) => {
                let id = block.value().attr("id").unwrap_or("?");
                tracing::warn!("skipping comment {} on {}: {}", id, url, e);
            }
        }
    }

    out.tasks.extend(plan_pages(
        body,
        url,
        &TaskPayload::CommentThread {
            tweet_url: tweet_url.to_string(),
        },
        priority::DEFAULT,
    ));
    Ok(out)
}

fn extract_comment_block(
    block: ElementRef,
    tweet_url: &str,
    ctx: &ExtractContext,
) -> ExtractResult<AuthorOutcome> {
    let id = block
        .value()
        .attr("id")
        .map(str::to_string)
        .ok_or_else(|| ExtractError::Missing {
            what: "comment id",
            context: tweet_url.to_string(),
        })?;

    let nodes = content_nodes(block);
    let content = reconstruct(
        &nodes,
        &ReconstructRules {
            stop_prefixes: &[REPORT_MARKER],
            recurse_content_spans: true,
            ..Default::default()
        },
    );

    let raw_time = block
        .select(&selector("span.ct"))
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| ExtractError::Missing {
            what: "meta span",
            context: id.clone(),
        })?;
    let raw_time = match raw_time.find('\u{a0}') {
        Some(at) => &raw_time[..at],
        None => raw_time.as_str(),
    };
    let created_at = normalize_time(raw_time, ctx.clock.anchor)?;

    let mut comment = Comment {
        id: id.clone(),
        tweet_url: tweet_url.to_string(),
        content,
        created_at,
        user_id: None,
        crawl_time: ctx.clock.unix,
    };

    let href = nodes
        .iter()
        .find(|node| node.kind == NodeKind::Link)
        .and_then(|node| node.href.as_deref())
        .ok_or(ExtractError::Missing {
            what: "author link",
            context: id,
        })?;
    let parts: Vec<&str> = href.split('/').collect();
    if parts.len() == 3 && parts[1] == "u" {
        let user_id = parts[2].parse().map_err(|_| ExtractError::Permalink {
            href: href.to_string(),
        })?;
        comment.user_id = Some(user_id);
        return Ok(AuthorOutcome::Resolved(comment));
    }

    let handle = parts.last().copied().unwrap_or_default().to_string();
    if handle.is_empty() {
        return Err(ExtractError::Permalink {
            href: href.to_string(),
        });
    }
    if let Some(user_id) = ctx.cache.get(&handle) {
        comment.user_id = Some(user_id);
        return Ok(AuthorOutcome::Resolved(comment));
    }
    Ok(AuthorOutcome::Pending(FetchTask {
        url: format!("{}{}", ctx.base_url, href),
        payload: TaskPayload::CommentAuthor { comment, handle },
        priority: priority::DEFAULT,
        dedupe: false,
    }))
}

/// Resolves a commenter's numeric id from their profile page
///
/// The id is read from the follow-action link, written into the shared
/// cache under the carried handle, and the completed comment is emitted.
pub fn resolve_comment_author(
    body: &str,
    url: &str,
    mut comment: Comment,
    handle: String,
    ctx: &ExtractContext,
) -> ExtractResult<Extraction> {
    let document = Html::parse_document(body);
    let follow_href = document
        .select(&selector("a"))
        .find_map(|a| {
            let href = a.value().attr("href")?;
            let text: String = a.text().collect();
            (text.contains(FOLLOW_TEXT) && href.contains(FOLLOW_PATH)).then(|| href.to_string())
        })
        .ok_or_else(|| ExtractError::Missing {
            what: "follow link",
            context: url.to_string(),
        })?;
    let user_id: u64 = RE_FOLLOW_ID
        .captures(&follow_href)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or(ExtractError::AnchorId { url: follow_href })?;

    ctx.cache.insert(&handle, user_id);
    comment.user_id = Some(user_id);
    Ok(Extraction {
        records: vec![Record::Comment(comment)],
        tasks: Vec::new(),
    })
}
