//! Minimal tree interface the statement extractor walks.
//!
//! Anything that can report a tag name, attributes, text and children can be
//! extracted from: parsed HTML via [`HtmlNode`], or a hand-built [`OwnedNode`].

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;

pub trait DomNode: Clone {
    /// Element tag name; `None` for text, comments and the document root.
    fn tag_name(&self) -> Option<&str>;
    fn attr(&self, name: &str) -> Option<&str>;
    /// Character data of a text node; `None` for every other node kind.
    fn own_text(&self) -> Option<&str>;
    fn children(&self) -> Vec<Self>;
}

/// A node of a document parsed by `scraper`.
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(NodeRef<'a, Node>);

impl<'a> HtmlNode<'a> {
    pub fn document(html: &'a Html) -> Self {
        Self(html.tree.root())
    }
}

impl<'a> DomNode for HtmlNode<'a> {
    fn tag_name(&self) -> Option<&str> {
        self.0.value().as_element().map(|element| element.name())
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0
            .value()
            .as_element()
            .and_then(|element| element.attr(name))
    }

    fn own_text(&self) -> Option<&str> {
        self.0.value().as_text().map(|text| &**text)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children().map(HtmlNode).collect()
    }
}

/// Owned tree for building documents by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<OwnedNode>,
    },
    Text(String),
}

impl OwnedNode {
    pub fn element(tag: impl Into<String>) -> Self {
        OwnedNode::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        OwnedNode::Text(text.into())
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let OwnedNode::Element { attrs, .. } = &mut self {
            attrs.push((name.into(), value.into()));
        }
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_child(mut self, child: OwnedNode) -> Self {
        if let OwnedNode::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(OwnedNode::text(text))
    }
}

impl<'a> DomNode for &'a OwnedNode {
    fn tag_name(&self) -> Option<&str> {
        match self {
            OwnedNode::Element { tag, .. } => Some(tag.as_str()),
            OwnedNode::Text(_) => None,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match self {
            OwnedNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            OwnedNode::Text(_) => None,
        }
    }

    fn own_text(&self) -> Option<&str> {
        match self {
            OwnedNode::Text(text) => Some(text.as_str()),
            OwnedNode::Element { .. } => None,
        }
    }

    fn children(&self) -> Vec<Self> {
        match *self {
            OwnedNode::Element { children, .. } => children.iter().collect(),
            OwnedNode::Text(_) => Vec::new(),
        }
    }
}

pub fn is_tag<N: DomNode>(node: &N, tag: &str) -> bool {
    node.tag_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

pub fn has_class<N: DomNode>(node: &N, class: &str) -> bool {
    node.attr("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

/// First node in pre-order (the node itself included) matching `pred`.
pub fn find_first<N: DomNode>(node: &N, pred: &dyn Fn(&N) -> bool) -> Option<N> {
    if pred(node) {
        return Some(node.clone());
    }
    node.children()
        .iter()
        .find_map(|child| find_first(child, pred))
}

/// All nodes in pre-order matching `pred`. Matches are not searched further.
pub fn find_all<N: DomNode>(node: &N, pred: &dyn Fn(&N) -> bool) -> Vec<N> {
    let mut found = Vec::new();
    collect_matches(node, pred, &mut found);
    found
}

fn collect_matches<N: DomNode>(node: &N, pred: &dyn Fn(&N) -> bool, found: &mut Vec<N>) {
    if pred(node) {
        found.push(node.clone());
        return;
    }
    for child in node.children() {
        collect_matches(&child, pred, found);
    }
}

/// Full descendant text. `<br>` becomes `\n`; block elements are separated
/// by a space so adjacent paragraphs don't run together.
pub fn text_content<N: DomNode>(node: &N) -> String {
    text_content_excluding(node, &|_| false)
}

/// Like [`text_content`], skipping every subtree for which `skip` holds.
pub fn text_content_excluding<N: DomNode>(node: &N, skip: &dyn Fn(&N) -> bool) -> String {
    let mut out = String::new();
    collect_text(node, skip, &mut out);
    out
}

fn collect_text<N: DomNode>(node: &N, skip: &dyn Fn(&N) -> bool, out: &mut String) {
    if let Some(text) = node.own_text() {
        out.push_str(text);
        return;
    }
    if skip(node) {
        return;
    }
    let tag = node.tag_name().map(str::to_ascii_lowercase);
    match tag.as_deref() {
        Some("br") => out.push('\n'),
        Some("script" | "style" | "noscript" | "template") => {}
        Some(name) if is_block_tag(name) => {
            out.push(' ');
            for child in node.children() {
                collect_text(&child, skip, out);
            }
            out.push(' ');
        }
        _ => {
            for child in node.children() {
                collect_text(&child, skip, out);
            }
        }
    }
}

pub(crate) fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "ul"
            | "ol"
            | "li"
            | "pre"
            | "center"
            | "table"
            | "tr"
            | "td"
            | "th"
            | "blockquote"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

#[cfg(test)]
mod tests {
    use super::{find_all, has_class, text_content, OwnedNode};

    #[test]
    fn class_match_is_whole_word() {
        let node = OwnedNode::element("div").with_class("input-specification");
        assert!(has_class(&&node, "input-specification"));
        assert!(!has_class(&&node, "input"));
    }

    #[test]
    fn text_content_separates_blocks_and_keeps_breaks() {
        let node = OwnedNode::element("div")
            .with_child(OwnedNode::element("p").with_text("a"))
            .with_child(OwnedNode::element("p").with_text("b"))
            .with_child(OwnedNode::element("br"))
            .with_text("c");
        assert_eq!(text_content(&&node), "  a  b \nc ");
    }

    #[test]
    fn find_all_does_not_descend_into_matches() {
        let node = OwnedNode::element("div").with_child(
            OwnedNode::element("div")
                .with_class("x")
                .with_child(OwnedNode::element("div").with_class("x")),
        );
        assert_eq!(find_all(&&node, &|n| has_class(n, "x")).len(), 1);
    }
}
