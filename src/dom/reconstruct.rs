//! Text reconstruction over a content-node sequence
//!
//! The same walk serves post bodies, repost reasons and comment text; the
//! rules struct carries the per-caller variations (where to stop, what to
//! skip, how deep to look).

use crate::dom::{ContentNode, NodeKind};

/// Rules steering one reconstruction pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconstructRules {
    /// Suppress the own text and children of the first N nodes; their
    /// trailing text is kept (a skipped label's tail is often the payload)
    pub skip: usize,

    /// Stop at a link or span whose text begins with one of these action
    /// markers; everything after is page furniture
    pub stop_prefixes: &'static [&'static str],

    /// Stop at any link node
    pub stop_on_links: bool,

    /// After a node's own text, append each child's emoticon alt and tail
    pub descend_tails: bool,

    /// Recurse into a `ctt` content span for its text/tail/emoticon children
    pub recurse_content_spans: bool,
}

/// Rebuilds normalized text from a content-node sequence
///
/// Nodes are visited in document order. An emoticon image contributes its
/// alt text in place; every other node contributes its trimmed own text;
/// trailing text attached to a node always follows it. A trailing open
/// bracket left by a stripped action link is trimmed, as is surrounding
/// whitespace.
pub fn reconstruct(nodes: &[ContentNode], rules: &ReconstructRules) -> String {
    let mut out = String::new();
    for (index, node) in nodes.iter().enumerate() {
        if is_stop_node(node, rules) {
            break;
        }
        if index < rules.skip {
            out.push_str(node.tail.trim());
            continue;
        }
        if node.is_emoticon() {
            if let Some(alt) = &node.alt {
                out.push_str(alt);
            }
        } else {
            out.push_str(node.text.trim());
        }
        if rules.recurse_content_spans && node.kind == NodeKind::Span && node.has_class("ctt") {
            for child in &node.children {
                push_nested(&mut out, child);
            }
        } else if rules.descend_tails {
            for child in &node.children {
                if child.is_emoticon() {
                    if let Some(alt) = &child.alt {
                        out.push_str(alt);
                    }
                }
                out.push_str(child.tail.trim());
            }
        }
        out.push_str(node.tail.trim());
    }
    let out = out.trim();
    let out = out.strip_suffix('[').unwrap_or(out);
    out.trim().to_string()
}

fn is_stop_node(node: &ContentNode, rules: &ReconstructRules) -> bool {
    match node.kind {
        NodeKind::Link => {
            rules.stop_on_links || starts_with_marker(&node.text, rules.stop_prefixes)
        }
        NodeKind::Span => starts_with_marker(&node.text, rules.stop_prefixes),
        _ => false,
    }
}

fn starts_with_marker(text: &str, markers: &[&str]) -> bool {
    let text = text.trim_start();
    markers.iter().any(|marker| text.starts_with(marker))
}

fn push_nested(out: &mut String, node: &ContentNode) {
    if node.is_emoticon() {
        if let Some(alt) = &node.alt {
            out.push_str(alt);
        }
    } else {
        out.push_str(node.text.trim());
    }
    for child in &node.children {
        push_nested(out, child);
    }
    out.push_str(node.tail.trim());
}
