//! Turns rendered HTML into a flat, document-ordered list of classified nodes.

use async_trait::async_trait;
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::ParserConfig;
use crate::dom::snapshot::{DomSnapshot, NodeId, NodeRef};
use crate::dom::surface::RenderingSurface;
use crate::errors::{ConversionError, Result};
use crate::extractors::classifier::classify;
use crate::extractors::shape::extract_fill;
use crate::extractors::text::leading_icon;
use crate::models::common::ElementType;
use crate::models::page::SlideBackground;
use crate::plugins::ParseContext;

/// One classified node: emitted once per element type it satisfies.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNode {
    pub slide_index: usize,
    pub node: NodeId,
    pub context: ParseContext,
}

/// A slide root as found in the rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSlide {
    pub index: usize,
    pub root: NodeId,
    pub background: Option<SlideBackground>,
}

/// The rendered document together with everything the parser found in it.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub snapshot: DomSnapshot,
    pub slides: Vec<ParsedSlide>,
    pub nodes: Vec<ParsedNode>,
}

impl ParsedDocument {
    pub fn node(&self, parsed: &ParsedNode) -> Option<NodeRef<'_>> {
        self.snapshot.node(parsed.node)
    }
}

/// Produces the classified node list for a document.
#[async_trait]
pub trait ParserStrategy: Send + Sync {
    async fn parse(&self, html: &str, config: &ParserConfig) -> Result<ParsedDocument>;
}

/// Renders through a [`RenderingSurface`] and walks each slide root in document order.
#[derive(Clone)]
pub struct SurfaceParser {
    surface: Arc<dyn RenderingSurface>,
}

impl SurfaceParser {
    pub fn new(surface: Arc<dyn RenderingSurface>) -> Self {
        Self { surface }
    }
}

#[async_trait]
impl ParserStrategy for SurfaceParser {
    async fn parse(&self, html: &str, config: &ParserConfig) -> Result<ParsedDocument> {
        let snapshot = self.surface.render(html, config.dimensions).await?;
        let (slides, nodes) = walk_slides(&snapshot, &config.selector)?;
        Ok(ParsedDocument {
            snapshot,
            slides,
            nodes,
        })
    }
}

fn is_renderable(node: &NodeRef<'_>) -> bool {
    let rect = node.rect();
    !node.style().is_hidden() && (rect.width > 0.0 || rect.height > 0.0)
}

/// True if an ancestor of `node` below `slide_root` has been consumed.
fn is_consumed(node: &NodeRef<'_>, slide_root: &NodeRef<'_>, consumed: &HashSet<NodeId>) -> bool {
    node.ancestors()
        .take_while(|a| a.id() != slide_root.id())
        .any(|a| consumed.contains(&a.id()))
}

/// Classifies every node of every slide root matched by `selector`.
///
/// Descendants of a node classified `text` or `table` are skipped, except that the slide
/// root itself never consumes its subtree. A leading icon of a text node is still emitted,
/// as an `image` right after its text.
pub fn walk_slides(
    snapshot: &DomSnapshot,
    selector: &str,
) -> Result<(Vec<ParsedSlide>, Vec<ParsedNode>)> {
    let roots = snapshot.query_selector_all(selector)?;
    if roots.is_empty() {
        return Err(ConversionError::NoSlidesFound {
            selector: selector.to_string(),
        });
    }

    let mut slides = Vec::with_capacity(roots.len());
    let mut nodes = Vec::new();
    for (slide_index, root) in roots.iter().enumerate() {
        slides.push(ParsedSlide {
            index: slide_index,
            root: root.id(),
            background: extract_fill(root.style()).map(|fill| SlideBackground { fill }),
        });

        let mut consumed: HashSet<NodeId> = HashSet::new();
        let before = nodes.len();
        for node in std::iter::once(*root).chain(root.descendants()) {
            if is_consumed(&node, root, &consumed) || !is_renderable(&node) {
                continue;
            }
            for element_type in classify(&node) {
                if matches!(element_type, ElementType::Table | ElementType::Text) {
                    consumed.insert(node.id());
                }
                nodes.push(ParsedNode {
                    slide_index,
                    node: node.id(),
                    context: ParseContext::new(&node, element_type, slide_index, root),
                });
                if element_type != ElementType::Text || node.id() == root.id() {
                    continue;
                }
                // The text box leaves room for its leading icon, which is drawn on its own.
                if let Some(icon) = leading_icon(node).filter(is_renderable) {
                    nodes.push(ParsedNode {
                        slide_index,
                        node: icon.id(),
                        context: ParseContext::new(&icon, ElementType::Image, slide_index, root),
                    });
                }
            }
        }
        debug!(
            "Slide {} ({}): {} classified node(s), {} consumed subtree(s)",
            slide_index,
            root.tag_name(),
            nodes.len() - before,
            consumed.len()
        );
    }
    Ok((slides, nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;
    use crate::dom::snapshot::Rect;
    use crate::dom::surface::StaticSurface;
    use crate::models::shape_properties::Fill;

    fn deck() -> DomSnapshot {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let slide = b
            .element(root, "div", Rect::new(0.0, 0.0, 992.0, 558.0))
            .class("slide")
            .style("background-color", "rgb(255, 255, 255)")
            .id();
        let p = b.element(slide, "p", Rect::new(10.0, 10.0, 200.0, 20.0)).id();
        b.text(p, "Hello ");
        let strong = b.element(p, "strong", Rect::new(60.0, 10.0, 50.0, 20.0)).id();
        b.text(strong, "world");
        let hidden = b
            .element(slide, "p", Rect::new(10.0, 40.0, 200.0, 20.0))
            .style("display", "none")
            .id();
        b.text(hidden, "secret");
        let table = b.element(slide, "table", Rect::new(10.0, 80.0, 300.0, 100.0)).id();
        let tr = b.element(table, "tr", Rect::new(10.0, 80.0, 300.0, 20.0)).id();
        let td = b.element(tr, "td", Rect::new(10.0, 80.0, 150.0, 20.0)).id();
        b.text(td, "cell");
        b.element(root, "div", Rect::new(0.0, 600.0, 992.0, 558.0))
            .class("slide");
        b.build()
    }

    #[test]
    fn test_consumed_descendants_are_skipped() {
        let snapshot = deck();
        let (slides, nodes) = walk_slides(&snapshot, ".slide").unwrap();
        assert_eq!(slides.len(), 2);
        assert!(matches!(
            slides[0].background.as_ref().map(|b| &b.fill),
            Some(Fill::Solid { .. })
        ));

        let tags: Vec<(&str, ElementType)> = nodes
            .iter()
            .map(|n| (n.context.tag_name.as_str(), n.context.element_type))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("div", ElementType::Shape),
                ("p", ElementType::Text),
                ("table", ElementType::Table),
            ]
        );
        assert!(nodes.iter().all(|n| n.slide_index == 0));
    }

    #[test]
    fn test_leading_icon_is_walked_as_image() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let slide = b
            .element(root, "div", Rect::new(0.0, 0.0, 992.0, 558.0))
            .class("slide")
            .id();
        let li = b.element(slide, "li", Rect::new(10.0, 10.0, 200.0, 20.0)).id();
        let icon = b
            .element(li, "i", Rect::new(10.0, 12.0, 16.0, 16.0))
            .class("fa-solid fa-star")
            .id();
        b.text(li, "Done");
        let snapshot = b.build();

        let (_, nodes) = walk_slides(&snapshot, ".slide").unwrap();
        let walked: Vec<(NodeId, ElementType)> = nodes
            .iter()
            .map(|n| (n.node, n.context.element_type))
            .collect();
        assert_eq!(
            walked,
            vec![(li, ElementType::Text), (icon, ElementType::Image)]
        );
        assert_eq!(nodes[1].context.rect, Rect::new(10.0, 12.0, 16.0, 16.0));
    }

    #[test]
    fn test_no_slides() {
        let err = walk_slides(&deck(), "section").unwrap_err();
        assert!(matches!(err, ConversionError::NoSlidesFound { selector } if selector == "section"));
    }

    #[tokio::test]
    async fn test_surface_parser_renders_then_walks() {
        let parser = SurfaceParser::new(Arc::new(StaticSurface::new(deck())));
        let parsed = parser
            .parse("<html></html>", &ParserConfig::default())
            .await
            .unwrap();
        assert_eq!(parsed.slides.len(), 2);
        let first = parsed.node(&parsed.nodes[1]).unwrap();
        assert_eq!(first.tag_name(), "p");
    }
}
