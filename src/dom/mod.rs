//! Content-node model for parsed page regions
//!
//! Extractors never touch the markup library directly: a fetched region is
//! converted into a sequence of [`ContentNode`]s first, and all text
//! reconstruction works over that sequence.

mod node;
mod reconstruct;

pub use node::{content_nodes, ContentNode, NodeKind};
pub use reconstruct::{reconstruct, ReconstructRules};

use scraper::Selector;

/// Marker an image's source must contain to count as an emoticon glyph
pub const EMOTICON_MARKER: &str = "emoticon";

/// Parses a CSS selector that is a compile-time constant
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Collects all text of an element, in document order
pub(crate) fn element_text(el: scraper::ElementRef) -> String {
    el.text().collect()
}
