//! Programmatic construction of [`DomSnapshot`]s, for tests and for surfaces that
//! assemble snapshots from a driver's node dumps.

use super::snapshot::{DomSnapshot, NodeData, NodeId, Rect};
use super::style::ComputedStyle;
use indexmap::IndexMap;

/// Builds a snapshot top-down. The document starts with a single `body` element.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: DomSnapshot,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        let mut snapshot = DomSnapshot::default();
        snapshot.root = snapshot.push(
            NodeData::Element {
                tag: "body".to_string(),
                attributes: IndexMap::new(),
                style: ComputedStyle::new(),
                rect: Rect::default(),
            },
            None,
        );
        Self { snapshot }
    }

    pub fn root(&self) -> NodeId {
        self.snapshot.root
    }

    /// Appends an element under `parent` and returns a handle for setting its attributes.
    pub fn element(&mut self, parent: NodeId, tag: &str, rect: Rect) -> ElementBuilder<'_> {
        let id = self.snapshot.push(
            NodeData::Element {
                tag: tag.to_ascii_lowercase(),
                attributes: IndexMap::new(),
                style: ComputedStyle::new(),
                rect,
            },
            Some(parent),
        );
        ElementBuilder { builder: self, id }
    }

    /// Appends a text node under `parent`.
    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.snapshot.push(
            NodeData::Text {
                text: text.to_string(),
            },
            Some(parent),
        )
    }

    pub fn build(self) -> DomSnapshot {
        self.snapshot
    }
}

/// Handle to a freshly appended element.
pub struct ElementBuilder<'a> {
    builder: &'a mut SnapshotBuilder,
    id: NodeId,
}

impl ElementBuilder<'_> {
    pub fn attr(self, name: &str, value: &str) -> Self {
        if let Some(NodeData::Element { attributes, .. }) = self.builder.snapshot.data_mut(self.id) {
            attributes.insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, property: &str, value: &str) -> Self {
        if let Some(NodeData::Element { style, .. }) = self.builder.snapshot.data_mut(self.id) {
            style.set(property, value);
        }
        self
    }

    pub fn styles(mut self, pairs: &[(&str, &str)]) -> Self {
        for (property, value) in pairs {
            self = self.style(property, value);
        }
        self
    }

    /// Finishes the element and returns its id.
    pub fn id(self) -> NodeId {
        self.id
    }
}
