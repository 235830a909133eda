//! Profile extraction: info page and counts page
//!
//! The info page is parsed as one flattened text dump with a lazy
//! label-anchored pattern per field; every field tolerates absence. The
//! counts page supplies the three bracketed counters and fans out the
//! timeline, follow and fan listings.

use crate::dom::selector;
use crate::extract::{ExtractContext, Extraction};
use crate::model::{Profile, Record, SexOrientation};
use crate::task::{priority, FetchTask, TaskPayload};
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static RE_INFO_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)/info").unwrap());
static RE_LABELS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("标签;?[：:]?(.*?)更多>>").unwrap());
static RE_TWEET_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"微博\[(\d+)\]").unwrap());
static RE_FOLLOW_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"关注\[(\d+)\]").unwrap());
static RE_FAN_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"粉丝\[(\d+)\]").unwrap());

/// Parses the profile info page
///
/// Emits no record yet: the partial profile rides on the counts-page task
/// and is emitted once the counters are in.
pub fn extract_profile_info(
    body: &str,
    url: &str,
    ctx: &ExtractContext,
) -> ExtractResult<Extraction> {
    let id: u64 = RE_INFO_ID
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| ExtractError::AnchorId {
            url: url.to_string(),
        })?;

    let document = Html::parse_document(body);
    let text = flatten_info_text(&document);

    let mut profile = Profile::new(id, ctx.clock.unix);
    profile.nick_name = labeled_field(&text, "昵称");
    profile.gender = labeled_field(&text, "性别");
    if let Some(place) = labeled_field(&text, "地区") {
        let mut parts = place.splitn(2, ' ');
        profile.province = parts.next().map(str::to_string).filter(|p| !p.is_empty());
        profile.city = parts.next().map(str::to_string).filter(|c| !c.is_empty());
    }
    profile.brief_introduction = labeled_field(&text, "简介");
    profile.birthday = labeled_field(&text, "生日");
    if let (Some(raw), Some(gender)) = (labeled_field(&text, "性取向"), profile.gender.as_deref())
    {
        profile.sex_orientation = Some(SexOrientation::from_raw(&raw, gender));
    }
    profile.sentiment = labeled_field(&text, "感情状况");
    profile.vip_level = labeled_field(&text, "会员等级");
    profile.authentication = labeled_field(&text, "认证");
    profile.labels = RE_LABELS
        .captures(&text)
        .map(|caps| {
            caps[1]
                .replace('\u{a0}', ",")
                .replace(';', "")
                .trim_matches(',')
                .to_string()
        })
        .filter(|labels| !labels.is_empty());

    let counts_url = format!("{}/u/{}", ctx.base_url, id);
    Ok(Extraction {
        records: Vec::new(),
        tasks: vec![FetchTask {
            url: counts_url,
            payload: TaskPayload::ProfileCounts { profile },
            priority: priority::HIGH,
            dedupe: false,
        }],
    })
}

/// Parses the counts page, completes the carried profile and fans out the
/// three listing sub-graphs
pub fn extract_profile_counts(
    body: &str,
    mut profile: Profile,
    ctx: &ExtractContext,
) -> ExtractResult<Extraction> {
    profile.tweet_count = captured_count(&RE_TWEET_COUNT, body);
    profile.follow_count = captured_count(&RE_FOLLOW_COUNT, body);
    profile.fan_count = captured_count(&RE_FAN_COUNT, body);

    let id = profile.id;
    let tasks = vec![
        FetchTask {
            url: format!("{}/{}/profile?page=1", ctx.base_url, id),
            payload: TaskPayload::Timeline,
            priority: priority::HIGH,
            dedupe: true,
        },
        FetchTask {
            url: format!("{}/{}/follow?page=1", ctx.base_url, id),
            payload: TaskPayload::FollowList,
            priority: priority::DEFAULT,
            dedupe: false,
        },
        FetchTask {
            url: format!("{}/{}/fans?page=1", ctx.base_url, id),
            payload: TaskPayload::FanList,
            priority: priority::DEFAULT,
            dedupe: false,
        },
    ];

    Ok(Extraction {
        records: vec![Record::Profile(profile)],
        tasks,
    })
}

/// Joins every text node under the page's `div.c` blocks with `;`
fn flatten_info_text(document: &Html) -> String {
    let block_selector = selector("div.c");
    document
        .select(&block_selector)
        .flat_map(|block| block.text())
        .collect::<Vec<_>>()
        .join(";")
}

/// Label-anchored field lookup over the flattened profile text
fn labeled_field(text: &str, label: &str) -> Option<String> {
    let pattern = format!("{label};?[：:]?(.*?);");
    let re = Regex::new(&pattern).ok()?;
    re.captures(text)
        .map(|caps| caps[1].replace('\u{a0}', ""))
        .filter(|value| !value.is_empty())
}

fn captured_count(re: &Regex, body: &str) -> Option<u64> {
    re.captures(body).and_then(|caps| caps[1].parse().ok())
}
