//! Arena model of a rendered document.
//!
//! A snapshot is what a rendering surface hands back after layout has settled:
//! every node with its attributes, resolved computed style and viewport-relative
//! bounding rectangle. Nodes refer to each other by index.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::selector::SelectorList;
use super::style::ComputedStyle;
use crate::errors::{ConversionError, Result};

/// Index of a node inside a [`DomSnapshot`].
pub type NodeId = usize;

static EMPTY_STYLE: Lazy<ComputedStyle> = Lazy::new(ComputedStyle::new);

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A viewport-relative rectangle, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeData {
    Element {
        /// Lowercase tag name.
        tag: String,
        #[serde(default)]
        attributes: IndexMap<String, String>,
        #[serde(default)]
        style: ComputedStyle,
        #[serde(default)]
        rect: Rect,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    #[serde(flatten)]
    pub data: NodeData,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
}

/// A rendered document. Node `root` is the document element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    pub(crate) nodes: Vec<DomNode>,
    #[serde(default)]
    pub(crate) root: NodeId,
}

impl DomSnapshot {
    /// Parses a snapshot from JSON and checks its links.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: DomSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Verifies that every link points at an existing node and that parent and child
    /// links agree with each other.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ConversionError::Render("snapshot has no nodes".to_string()));
        }
        if self.root >= self.nodes.len() {
            return Err(ConversionError::Render(format!(
                "root node {} does not exist",
                self.root
            )));
        }
        for (id, node) in self.nodes.iter().enumerate() {
            for child in &node.children {
                let parent_of_child = self.nodes.get(*child).and_then(|c| c.parent);
                if parent_of_child != Some(id) {
                    return Err(ConversionError::Render(format!(
                        "node {child} is listed as a child of {id} but does not point back to it"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { doc: self, id: self.root }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        std::iter::once(self.root())
            .chain(self.root().descendants())
            .find(|n| n.attr("id") == Some(id))
    }

    /// All elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeRef<'_>>> {
        let root = self.root();
        let list = SelectorList::parse(selector)?;
        Ok(std::iter::once(root)
            .chain(root.descendants())
            .filter(|n| list.matches(*n))
            .collect())
    }

    pub(crate) fn push(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(DomNode {
            data,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id).map(|n| &mut n.data)
    }
}

/// A borrowed handle to one node of a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a DomSnapshot,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a DomSnapshot {
        self.doc
    }

    fn node(&self) -> Option<&'a DomNode> {
        self.doc.nodes.get(self.id)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.node().map(|n| &n.data), Some(NodeData::Element { .. }))
    }

    /// Lowercase tag name; empty for text nodes.
    pub fn tag_name(&self) -> &'a str {
        match self.node().map(|n| &n.data) {
            Some(NodeData::Element { tag, .. }) => tag.as_str(),
            _ => "",
        }
    }

    /// Content of a text node; `None` for elements.
    pub fn text(&self) -> Option<&'a str> {
        match self.node().map(|n| &n.data) {
            Some(NodeData::Text { text }) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self.node().map(|n| &n.data) {
            Some(NodeData::Element { attributes, .. }) => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn element_id(&self) -> Option<&'a str> {
        self.attr("id")
    }

    pub fn class_list(&self) -> impl Iterator<Item = &'a str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }

    /// Computed style of an element. Text nodes report their parent element's style.
    pub fn style(&self) -> &'a ComputedStyle {
        match self.node().map(|n| &n.data) {
            Some(NodeData::Element { style, .. }) => style,
            Some(NodeData::Text { .. }) => self
                .parent()
                .map(|p| p.style())
                .unwrap_or(&*EMPTY_STYLE),
            None => &*EMPTY_STYLE,
        }
    }

    /// Viewport-relative bounding rectangle. Text nodes report their parent's rectangle.
    pub fn rect(&self) -> Rect {
        match self.node().map(|n| &n.data) {
            Some(NodeData::Element { rect, .. }) => *rect,
            Some(NodeData::Text { .. }) => self.parent().map(|p| p.rect()).unwrap_or_default(),
            None => Rect::default(),
        }
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let parent = self.node()?.parent?;
        self.doc.node(parent)
    }

    /// Parent, grandparent, ... up to the document root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    /// All child nodes, text nodes included.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> {
        let doc = self.doc;
        self.node()
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |id| doc.node(*id))
    }

    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> {
        self.children().filter(|c| c.is_element())
    }

    /// Descendant elements in document order, excluding `self` (the `querySelectorAll("*")` set).
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef<'a>> = self.element_children().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut kids: Vec<NodeRef<'a>> = node.element_children().collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// True if `other` is `self` or one of its descendants.
    pub fn contains(&self, other: &NodeRef<'_>) -> bool {
        if !std::ptr::eq(self.doc, other.doc) {
            return false;
        }
        other.id == self.id || other.ancestors().any(|a| a.id == self.id)
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = self.text() {
            out.push_str(text);
            return;
        }
        for child in self.children() {
            child.collect_text(out);
        }
    }

    /// Text held directly by this element (not by nested elements).
    pub fn direct_text(&self) -> Vec<&'a str> {
        self.children().filter_map(|c| c.text()).collect()
    }

    pub fn has_direct_text(&self) -> bool {
        self.direct_text().iter().any(|t| !t.trim().is_empty())
    }

    /// Serializes the subtree back to markup.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        if let Some(text) = self.text() {
            out.push_str(&escape_text(text));
            return;
        }
        let tag = self.tag_name();
        out.push('<');
        out.push_str(tag);
        if let Some(NodeData::Element { attributes, .. }) = self.node().map(|n| &n.data) {
            for (name, value) in attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&tag) {
            return;
        }
        for child in self.children() {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    /// Descendant elements of `self` matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeRef<'a>>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants()
            .into_iter()
            .filter(|n| list.matches(*n))
            .collect())
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeRef<'a>>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Nearest inclusive ancestor with the given tag.
    pub fn closest_tag(&self, tag: &str) -> Option<NodeRef<'a>> {
        std::iter::once(*self)
            .chain(self.ancestors())
            .find(|n| n.tag_name() == tag)
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;

    fn sample() -> DomSnapshot {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let slide = b
            .element(root, "div", Rect::new(10.0, 10.0, 100.0, 100.0))
            .class("slide")
            .id();
        let p = b
            .element(slide, "p", Rect::new(20.0, 20.0, 50.0, 10.0))
            .attr("id", "intro")
            .id();
        b.text(p, "Hello ");
        let strong = b.element(p, "strong", Rect::default()).id();
        b.text(strong, "world");
        b.element(slide, "img", Rect::default())
            .attr("src", "a.png")
            .attr("alt", "A \"quoted\" alt");
        b.build()
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = sample();
        let slide = doc.query_selector_all(".slide").unwrap()[0];
        let tags: Vec<&str> = slide.descendants().iter().map(|n| n.tag_name()).collect();
        assert_eq!(tags, vec!["p", "strong", "img"]);
    }

    #[test]
    fn test_text_content_and_direct_text() {
        let doc = sample();
        let p = doc.get_element_by_id("intro").unwrap();
        assert_eq!(p.text_content(), "Hello world");
        assert_eq!(p.direct_text(), vec!["Hello "]);
        assert!(p.has_direct_text());
        let slide = p.parent().unwrap();
        assert!(!slide.has_direct_text());
        assert!(slide.contains(&p));
        assert!(!p.contains(&slide));
    }

    #[test]
    fn test_outer_html_escapes_and_skips_void_close() {
        let doc = sample();
        let img = doc.query_selector_all("img").unwrap()[0];
        assert_eq!(
            img.outer_html(),
            "<img src=\"a.png\" alt=\"A &quot;quoted&quot; alt\">"
        );
        let p = doc.get_element_by_id("intro").unwrap();
        assert_eq!(
            p.outer_html(),
            "<p id=\"intro\">Hello <strong>world</strong></p>"
        );
    }

    #[test]
    fn test_json_round_trip_validates() {
        let doc = sample();
        let json = serde_json::to_string(&doc).unwrap();
        let back = DomSnapshot::from_json_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_validate_rejects_broken_links() {
        let json = r#"{"nodes":[{"kind":"element","tag":"body","children":[1]},{"kind":"text","text":"x"}],"root":0}"#;
        assert!(matches!(
            DomSnapshot::from_json_str(json),
            Err(ConversionError::Render(_))
        ));
    }
}
