//! Follow/fan listing extraction
//!
//! Both listings render the same action links next to each listed user;
//! only the edge orientation differs. On a follows listing the page's
//! anchor user is the follower; on a fans listing the anchor user is the
//! followed one.

use crate::dom::{element_text, selector};
use crate::extract::{plan_pages, ExtractContext, Extraction};
use crate::model::{Record, Relationship};
use crate::task::{priority, TaskPayload};
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use std::sync::LazyLock;

static RE_UID_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"uid=(\d+)").unwrap());
static RE_FOLLOW_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)/follow").unwrap());
static RE_FAN_ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)/fans").unwrap());

const FOLLOW_ACTIONS: &[&str] = &["关注他", "关注她", "取消关注"];
const FAN_ACTIONS: &[&str] = &["关注他", "关注她", "移除"];

/// Parses a follows listing: anchor user → discovered user edges
pub fn extract_follow_list(
    body: &str,
    url: &str,
    ctx: &ExtractContext,
) -> ExtractResult<Extraction> {
    let anchor_id = page_anchor_id(&RE_FOLLOW_ANCHOR, url)?;
    let records = action_link_ids(body, FOLLOW_ACTIONS)
        .into_iter()
        .map(|discovered| {
            Record::Relationship(Relationship {
                follower_id: anchor_id,
                followed_id: discovered,
                crawl_time: ctx.clock.unix,
            })
        })
        .collect();
    Ok(Extraction {
        records,
        tasks: plan_pages(body, url, &TaskPayload::FollowList, priority::DEFAULT),
    })
}

/// Parses a fans listing: discovered user → anchor user edges
pub fn extract_fan_list(
    body: &str,
    url: &str,
    ctx: &ExtractContext,
) -> ExtractResult<Extraction> {
    let anchor_id = page_anchor_id(&RE_FAN_ANCHOR, url)?;
    let records = action_link_ids(body, FAN_ACTIONS)
        .into_iter()
        .map(|discovered| {
            Record::Relationship(Relationship {
                follower_id: discovered,
                followed_id: anchor_id,
                crawl_time: ctx.clock.unix,
            })
        })
        .collect();
    Ok(Extraction {
        records,
        tasks: plan_pages(body, url, &TaskPayload::FanList, priority::DEFAULT),
    })
}

fn page_anchor_id(re: &Regex, url: &str) -> ExtractResult<u64> {
    re.captures(url)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| ExtractError::AnchorId {
            url: url.to_string(),
        })
}

/// Collects the distinct uid parameters of all recognized action links,
/// in document order
fn action_link_ids(body: &str, actions: &[&str]) -> Vec<u64> {
    let document = Html::parse_document(body);
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    for anchor in document.select(&selector("a")) {
        let text = element_text(anchor);
        if !actions.contains(&text.trim()) {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if let Some(uid) = RE_UID_PARAM
            .captures(href)
            .and_then(|caps| caps[1].parse().ok())
        {
            if seen.insert(uid) {
                ids.push(uid);
            }
        }
    }
    ids
}
