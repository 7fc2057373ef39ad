//! Decides which element types a rendered node represents.

use super::color::sanitize_color;
use super::icon::is_icon_element;
use super::stroke::{single_border_side, uniform_border};
use crate::dom::snapshot::NodeRef;
use crate::models::common::ElementType;

pub const TEXT_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "div", "a", "li", "label", "strong", "em",
    "b", "i", "u", "s", "small", "mark", "blockquote", "figcaption", "code", "button", "dt",
    "dd",
];

const IMAGE_TAGS: &[&str] = &["img", "picture", "svg"];

/// Attribute marking a canvas as the anchor of an embedded chart.
pub const CHART_MARKER_ATTR: &str = "data-chart";

/// Element types of `node`, in emission order.
///
/// Tag-based types (`image`, `table`, `chart`, `line` for `hr`) are exclusive. Otherwise a
/// node with exactly one visible border side is a `line` and never a `shape`; a node can be
/// both `shape` and `text`. An empty result means the node emits nothing.
pub fn classify(node: &NodeRef<'_>) -> Vec<ElementType> {
    if !node.is_element() {
        return Vec::new();
    }
    let tag = node.tag_name();
    if IMAGE_TAGS.contains(&tag) {
        return vec![ElementType::Image];
    }
    match tag {
        "table" => return vec![ElementType::Table],
        "canvas" => {
            let is_chart = node
                .attr(CHART_MARKER_ATTR)
                .map(|v| !v.is_empty())
                .unwrap_or(false);
            return vec![if is_chart {
                ElementType::Chart
            } else {
                ElementType::Image
            }];
        }
        "hr" => return vec![ElementType::Line],
        _ => {}
    }
    if is_icon_element(node) {
        return vec![ElementType::Image];
    }

    let mut types = Vec::with_capacity(2);
    if single_border_side(node.style()).is_some() {
        types.push(ElementType::Line);
    } else if has_shape_styling(node) {
        types.push(ElementType::Shape);
    }
    if TEXT_TAGS.contains(&tag) && node.has_direct_text() {
        types.push(ElementType::Text);
    }
    types
}

/// A visible background, background image, uniform border, shadow or rounded corner.
pub fn has_shape_styling(node: &NodeRef<'_>) -> bool {
    let style = node.style();
    let has_background = !sanitize_color(style.value("background-color")).is_empty();
    let has_background_image = style
        .get("background-image")
        .map(|v| v != "none")
        .unwrap_or(false);
    let has_shadow = style
        .get("box-shadow")
        .map(|v| v != "none")
        .unwrap_or(false);
    let has_radius = ["border-radius", "border-top-left-radius"]
        .iter()
        .any(|p| style.px(p).map(|r| r > 0.0).unwrap_or(false));

    has_background
        || has_background_image
        || uniform_border(style).is_some()
        || has_shadow
        || has_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;
    use crate::dom::snapshot::Rect;

    fn classify_one(tag: &str, styles: &[(&str, &str)], text: Option<&str>) -> Vec<ElementType> {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let id = b
            .element(root, tag, Rect::new(0.0, 0.0, 100.0, 40.0))
            .styles(styles)
            .id();
        if let Some(text) = text {
            b.text(id, text);
        }
        let doc = b.build();
        classify(&doc.node(id).unwrap())
    }

    #[test]
    fn test_tag_based_types_are_exclusive() {
        let red = [("background-color", "rgb(255, 0, 0)")];
        assert_eq!(classify_one("img", &red, None), vec![ElementType::Image]);
        assert_eq!(classify_one("svg", &[], None), vec![ElementType::Image]);
        assert_eq!(classify_one("table", &red, None), vec![ElementType::Table]);
        assert_eq!(classify_one("hr", &[], None), vec![ElementType::Line]);
        assert_eq!(classify_one("canvas", &[], None), vec![ElementType::Image]);
    }

    #[test]
    fn test_canvas_with_chart_marker() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let id = b
            .element(root, "canvas", Rect::default())
            .attr(CHART_MARKER_ATTR, "sales")
            .id();
        let doc = b.build();
        assert_eq!(classify(&doc.node(id).unwrap()), vec![ElementType::Chart]);
    }

    #[test]
    fn test_single_border_side_is_line_not_shape() {
        for side in ["top", "right", "bottom", "left"] {
            let width = format!("border-{side}-width");
            let style = format!("border-{side}-style");
            let color = format!("border-{side}-color");
            let types = classify_one(
                "div",
                &[
                    (width.as_str(), "2px"),
                    (style.as_str(), "solid"),
                    (color.as_str(), "rgb(0, 0, 0)"),
                ],
                None,
            );
            assert_eq!(types, vec![ElementType::Line], "side {side}");
        }
    }

    #[test]
    fn test_uniform_border_is_shape() {
        let owned: Vec<(String, String, String)> = ["top", "right", "bottom", "left"]
            .iter()
            .map(|s| {
                (
                    format!("border-{s}-width"),
                    format!("border-{s}-style"),
                    format!("border-{s}-color"),
                )
            })
            .collect();
        let mut styles = Vec::new();
        for (w, s, c) in &owned {
            styles.push((w.as_str(), "1px"));
            styles.push((s.as_str(), "solid"));
            styles.push((c.as_str(), "rgb(0, 0, 0)"));
        }
        assert_eq!(classify_one("div", &styles, None), vec![ElementType::Shape]);
    }

    #[test]
    fn test_shape_and_text_together() {
        let types = classify_one(
            "li",
            &[("background-color", "#eee"), ("border-radius", "4px")],
            Some("Item"),
        );
        assert_eq!(types, vec![ElementType::Shape, ElementType::Text]);
    }

    #[test]
    fn test_text_needs_direct_text() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let div = b.element(root, "div", Rect::default()).id();
        b.text(div, "   ");
        let span = b.element(div, "span", Rect::default()).id();
        b.text(span, "nested");
        let doc = b.build();
        assert!(classify(&doc.node(div).unwrap()).is_empty());
        assert_eq!(classify(&doc.node(span).unwrap()), vec![ElementType::Text]);
    }

    #[test]
    fn test_transparent_background_is_not_shape() {
        let types = classify_one(
            "section",
            &[("background-color", "rgba(0, 0, 0, 0)"), ("box-shadow", "none")],
            None,
        );
        assert!(types.is_empty());
    }

    #[test]
    fn test_icon_is_image() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let id = b
            .element(root, "i", Rect::default())
            .class("fa-solid fa-star")
            .id();
        let doc = b.build();
        assert_eq!(classify(&doc.node(id).unwrap()), vec![ElementType::Image]);
    }
}
