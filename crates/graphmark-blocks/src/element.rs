//! The output document tree.
//!
//! [`Element`] is a minimal HTML element tree: a tag name, an ordered
//! attribute list, and child nodes. Rules append to it during the
//! block-processing pass; serialization escapes text and attribute values.

use std::fmt::Write;

use crate::util::escape_html;

/// Tags serialized without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Text content, escaped on serialization.
    Text(String),
    /// Pre-rendered HTML, emitted verbatim.
    Raw(String),
}

/// An HTML element tree node.
///
/// Attributes keep insertion order so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag name and no attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name of this element.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set an attribute, replacing any existing value for the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child element.
    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append a text child (escaped when serialized).
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Append pre-rendered HTML (emitted verbatim when serialized).
    pub fn append_raw(&mut self, html: impl Into<String>) {
        self.children.push(Node::Raw(html.into()));
    }

    /// Child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Serialize this element including its own tag.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Serialize only the children, without this element's own tag.
    ///
    /// Used for document roots, where the root tag is a container artifact.
    #[must_use]
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_node(child, &mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        write!(out, "<{}", self.tag).unwrap();
        for (name, value) in &self.attrs {
            write!(out, r#" {}="{}""#, name, escape_html(value)).unwrap();
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            write_node(child, out);
        }
        write!(out, "</{}>", self.tag).unwrap();
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => element.write_html(out),
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Raw(html) => out.push_str(html),
    }
}
