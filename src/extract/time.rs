//! Time expression normalization
//!
//! The site renders creation times in four shapes: `N分钟前`,
//! `今天 HH:MM`, `MM月DD日 HH:MM` and a full `YYYY-MM-DD` timestamp.
//! Relative and year-less shapes are resolved against the crawl's anchor
//! time, never the wall clock, so extraction is deterministic.

use crate::{ExtractError, ExtractResult};
use chrono::{Datelike, Duration, Local, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::sync::LazyLock;

static MINUTES_AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)分钟前").unwrap());

/// Clock anchoring one crawl run
#[derive(Debug, Clone, Copy)]
pub struct CrawlClock {
    /// Anchor for relative and year-less time expressions
    pub anchor: NaiveDateTime,
    /// Unix timestamp stamped on every emitted record
    pub unix: i64,
}

impl CrawlClock {
    /// Anchors a run at the current local time
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            anchor: now.naive_local(),
            unix: now.timestamp(),
        }
    }

    /// A fixed clock, for deterministic extraction in tests
    pub fn fixed(anchor: NaiveDateTime, unix: i64) -> Self {
        Self { anchor, unix }
    }
}

/// Converts a site time expression into an absolute timestamp
///
/// Fails hard on anything unrecognized: a record with an unparseable time
/// is dropped by the caller rather than given a silent default date.
pub fn normalize_time(raw: &str, anchor: NaiveDateTime) -> ExtractResult<NaiveDateTime> {
    let raw = raw.trim();
    if let Some(caps) = MINUTES_AGO.captures(raw) {
        let minutes: i64 = caps[1].parse().map_err(|_| time_error(raw))?;
        let at = anchor - Duration::minutes(minutes);
        return Ok(truncate_to_minute(at));
    }
    if let Some(rest) = raw.strip_prefix("今天") {
        let time =
            NaiveTime::parse_from_str(rest.trim(), "%H:%M").map_err(|_| time_error(raw))?;
        return Ok(anchor.date().and_time(time));
    }
    if raw.contains('月') {
        let with_year = format!("{}年{}", anchor.year(), raw);
        return NaiveDateTime::parse_from_str(&with_year, "%Y年%m月%d日 %H:%M")
            .map_err(|_| time_error(raw));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .map_err(|_| time_error(raw))
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

fn time_error(raw: &str) -> ExtractError {
    ExtractError::Time {
        raw: raw.to_string(),
    }
}
