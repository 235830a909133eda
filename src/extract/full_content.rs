//! Full-content resolution for truncated posts
//!
//! The full-content page repeats the post inside the `#M_` container with
//! an author-name prefix and trailing metadata; the resolver cuts both off
//! and writes the remainder into the field the carried task designated.

use crate::dom::selector;
use crate::extract::Extraction;
use crate::model::{ContentField, Record, Tweet};
use crate::{ExtractError, ExtractResult};
use scraper::Html;

/// Completes a truncated post from its full-content page
///
/// Resolving the same record against the same page twice yields the same
/// record: the operation is idempotent.
pub fn resolve_full_content(
    body: &str,
    mut tweet: Tweet,
    field: ContentField,
) -> ExtractResult<Extraction> {
    let document = Html::parse_document(body);
    let container = document
        .select(&selector("#M_ > div"))
        .next()
        .ok_or_else(|| ExtractError::Missing {
            what: "full-content container",
            context: tweet.id.clone(),
        })?;
    let flat: String = container.text().collect();

    let (_, after_author) = flat.split_once(':').ok_or_else(|| ExtractError::Missing {
        what: "author prefix",
        context: tweet.id.clone(),
    })?;
    let trimmed_meta = match after_author.find('\u{a0}') {
        Some(at) => &after_author[..at],
        None => after_author,
    };
    let text = match trimmed_meta.split_once(':') {
        Some((_, after_label)) => after_label,
        None => trimmed_meta,
    };

    tweet.set_field(field, text.trim().to_string());
    Ok(Extraction {
        records: vec![Record::Tweet(tweet)],
        tasks: Vec::new(),
    })
}
