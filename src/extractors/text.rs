//! Text runs and plain text content of a text element.

use super::icon::is_icon_element;
use super::position::IconOffset;
use super::typography::extract_run_typography;
use crate::dom::snapshot::{NodeId, NodeRef};
use crate::models::properties::Typography;
use crate::models::text::{RunId, TextRuns};

const SKIPPED_TAGS: &[&str] = &["script", "style", "template", "noscript"];

/// Collapses every run of whitespace to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// The icon glyph at the very start of a text element, if any: an icon element that
/// precedes every non-whitespace text of `node`.
pub fn leading_icon<'a>(node: NodeRef<'a>) -> Option<NodeRef<'a>> {
    for child in node.children() {
        if let Some(text) = child.text() {
            if text.trim().is_empty() {
                continue;
            }
            return None;
        }
        return is_icon_element(&child).then_some(child);
    }
    None
}

/// Space a leading icon takes away from the text box.
pub fn icon_offset(icon: &NodeRef<'_>) -> IconOffset {
    IconOffset {
        width: icon.rect().width,
        margin_right: icon.style().px_or_zero("margin-right"),
    }
}

/// Builds the run tree of `node`. `skip` excludes one descendant (a leading icon).
pub fn extract_runs(node: NodeRef<'_>, skip: Option<NodeId>) -> TextRuns {
    let mut runs = TextRuns::new();
    for id in collect_runs(node, &mut runs, skip) {
        runs.add_root(id);
    }
    runs
}

fn collect_runs(node: NodeRef<'_>, runs: &mut TextRuns, skip: Option<NodeId>) -> Vec<RunId> {
    let children: Vec<NodeRef<'_>> = node.children().collect();
    let mut ids = Vec::new();

    for (index, child) in children.iter().enumerate() {
        if let Some(text) = child.text() {
            if !text.trim().is_empty() {
                ids.push(runs.push_text(collapse_whitespace(text), Typography::default(), None));
            } else if !ids.is_empty() && index + 1 < children.len() {
                // Whitespace between two inline runs still separates words.
                ids.push(runs.push_text(" ", Typography::default(), None));
            }
            continue;
        }

        if Some(child.id()) == skip {
            continue;
        }
        let tag = child.tag_name();
        if tag == "br" {
            ids.push(runs.push_line_break());
            continue;
        }
        if SKIPPED_TAGS.contains(&tag) || child.style().is_hidden() {
            continue;
        }

        let nested = collect_runs(*child, runs, skip);
        if nested.is_empty() {
            continue;
        }
        let typography = extract_run_typography(child.style(), node.style());
        let href = if tag == "a" {
            child.attr("href").map(str::to_string)
        } else {
            None
        };
        ids.push(runs.push_group(typography, href, nested));
    }
    ids
}

/// Plain text of a node: `<br>` becomes a newline, and block children (`p`, `div`)
/// followed by a sibling end with one. Whitespace is collapsed within each line.
pub fn extract_text_content(node: NodeRef<'_>) -> String {
    let mut raw = String::new();
    for child in node.children() {
        append_text(child, &mut raw);
    }
    raw.split('\n')
        .map(|line| collapse_whitespace(line).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn append_text(node: NodeRef<'_>, out: &mut String) {
    if let Some(text) = node.text() {
        out.push_str(&text.replace('\n', " "));
        return;
    }
    let tag = node.tag_name();
    if tag == "br" {
        out.push('\n');
        return;
    }
    if SKIPPED_TAGS.contains(&tag) {
        return;
    }
    for child in node.children() {
        append_text(child, out);
    }
    if matches!(tag, "p" | "div" | "li") && has_next_sibling(&node) {
        out.push('\n');
    }
}

fn has_next_sibling(node: &NodeRef<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let mut seen = false;
    for sibling in parent.children() {
        if seen {
            return true;
        }
        seen = sibling.id() == node.id();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;
    use crate::dom::snapshot::{DomSnapshot, Rect};
    use crate::models::properties::FontStyle;

    fn paragraph() -> (DomSnapshot, NodeId) {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let p = b
            .element(root, "p", Rect::new(0.0, 0.0, 300.0, 20.0))
            .styles(&[("color", "rgb(10, 20, 30)"), ("font-weight", "400")])
            .id();
        b.text(p, "Plain   text ");
        let span = b
            .element(p, "span", Rect::default())
            .styles(&[("color", "rgb(10, 20, 30)"), ("font-weight", "400")])
            .id();
        let strong = b
            .element(span, "strong", Rect::default())
            .styles(&[
                ("color", "rgb(10, 20, 30)"),
                ("font-weight", "700"),
                ("font-style", "italic"),
            ])
            .id();
        b.text(strong, "bold");
        b.element(p, "br", Rect::default());
        let a = b
            .element(p, "a", Rect::default())
            .attr("href", "https://example.com")
            .styles(&[("color", "rgb(0, 0, 255)"), ("font-weight", "400")])
            .id();
        b.text(a, "link");
        (b.build(), p)
    }

    #[test]
    fn test_runs_flatten_with_inheritance() {
        let (doc, p) = paragraph();
        let node = doc.node(p).unwrap();
        let block = crate::extractors::typography::extract_typography(node.style());
        let flat: Vec<_> = extract_runs(node, None)
            .flatten()
            .into_iter()
            .map(|r| {
                let typography = r.typography.merged_over(&block);
                (r.text, r.line_break, typography, r.href)
            })
            .collect();

        assert_eq!(flat[0].0, "Plain text ");
        assert_eq!(flat[1].0, "bold");
        assert_eq!(flat[1].2.font_weight.as_deref(), Some("700"));
        assert_eq!(flat[1].2.font_style, Some(FontStyle::Italic));
        assert_eq!(flat[1].2.color.as_deref(), Some("0a141e"));
        assert!(flat[2].1);
        assert_eq!(flat[3].0, "link");
        assert_eq!(flat[3].3.as_deref(), Some("https://example.com"));
        assert_eq!(flat[3].2.color.as_deref(), Some("0000ff"));
    }

    #[test]
    fn test_text_content() {
        let (doc, p) = paragraph();
        assert_eq!(
            extract_text_content(doc.node(p).unwrap()),
            "Plain text bold\nlink"
        );
    }

    #[test]
    fn test_leading_icon_is_detected_and_skipped() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let li = b.element(root, "li", Rect::new(0.0, 0.0, 200.0, 20.0)).id();
        b.text(li, "  ");
        let icon = b
            .element(li, "i", Rect::new(0.0, 0.0, 16.0, 16.0))
            .class("fa-solid fa-check")
            .style("margin-right", "6px")
            .id();
        b.text(li, "Done");
        let doc = b.build();
        let node = doc.node(li).unwrap();

        let found = leading_icon(node).unwrap();
        assert_eq!(found.id(), icon);
        assert_eq!(icon_offset(&found).total(), 22.0);
        let runs = extract_runs(node, Some(icon));
        assert_eq!(runs.plain_text(), "Done");
    }

    #[test]
    fn test_icon_after_text_is_not_leading() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let p = b.element(root, "p", Rect::default()).id();
        b.text(p, "Go");
        b.element(p, "i", Rect::default()).class("fa fa-arrow-right");
        let doc = b.build();
        assert!(leading_icon(doc.node(p).unwrap()).is_none());
    }
}
