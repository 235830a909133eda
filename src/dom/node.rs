//! Tagged content nodes with text/tail semantics
//!
//! `text` is the text between an element's start tag and its first child
//! element; `tail` is the text following the element at its parent's level.
//! A bare text run at the start of a region becomes a `Text` node of its
//! own, so no content is lost when a region opens with plain text.

use crate::dom::EMOTICON_MARKER;
use scraper::{ElementRef, Node};

/// Kind of a content node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A bare text run
    Text,
    /// An anchor element
    Link,
    /// An image element
    Image,
    /// A span element
    Span,
    /// Any other element
    Other,
}

/// One node of a parsed content region
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    pub kind: NodeKind,
    /// The node's own text
    pub text: String,
    /// Text following the node, up to its next sibling
    pub tail: String,
    pub href: Option<String>,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub class: Option<String>,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Converts an element and its subtree into a content node
    pub fn from_element(el: ElementRef) -> Self {
        let element = el.value();
        let kind = match element.name() {
            "a" => NodeKind::Link,
            "img" => NodeKind::Image,
            "span" => NodeKind::Span,
            _ => NodeKind::Other,
        };
        let mut node = ContentNode {
            kind,
            text: String::new(),
            tail: String::new(),
            href: element.attr("href").map(str::to_string),
            src: element.attr("src").map(str::to_string),
            alt: element.attr("alt").map(str::to_string),
            class: element.attr("class").map(str::to_string),
            children: Vec::new(),
        };
        for child in el.children() {
            match child.value() {
                Node::Text(t) => match node.children.last_mut() {
                    Some(last) => last.tail.push_str(t),
                    None => node.text.push_str(t),
                },
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        node.children.push(Self::from_element(child_el));
                    }
                }
                _ => {}
            }
        }
        node
    }

    fn text_run(text: &str) -> Self {
        ContentNode {
            kind: NodeKind::Text,
            text: text.to_string(),
            tail: String::new(),
            href: None,
            src: None,
            alt: None,
            class: None,
            children: Vec::new(),
        }
    }

    /// True for an image node flagged as an emoticon glyph
    pub fn is_emoticon(&self) -> bool {
        self.kind == NodeKind::Image
            && self
                .src
                .as_deref()
                .is_some_and(|src| src.contains(EMOTICON_MARKER))
    }

    /// True when the node's class attribute contains the given class
    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|part| part == class))
    }
}

/// Builds the child node sequence of a container element
///
/// Mirrors how the element's children read in document order: each child
/// element becomes one node carrying the text that trails it; a non-empty
/// text run before the first child element becomes a leading `Text` node.
pub fn content_nodes(el: ElementRef) -> Vec<ContentNode> {
    let mut nodes: Vec<ContentNode> = Vec::new();
    for child in el.children() {
        match child.value() {
            Node::Text(t) => match nodes.last_mut() {
                Some(last) => last.tail.push_str(t),
                None => {
                    if !t.trim().is_empty() {
                        nodes.push(ContentNode::text_run(t));
                    }
                }
            },
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    nodes.push(ContentNode::from_element(child_el));
                }
            }
            _ => {}
        }
    }
    nodes
}
