//! List bullets.

use crate::constants::DEFAULT_BULLET_INDENT;
use crate::dom::snapshot::NodeRef;
use crate::models::bullet::{Bullet, BulletKind};

/// Bullet of an `li` directly under `ul`/`ol`. Ordered lists and decimal list styles
/// number their items starting at the item's 1-based position.
pub fn extract_bullet(node: NodeRef<'_>, indent: Option<f64>) -> Option<Bullet> {
    if node.tag_name() != "li" {
        return None;
    }
    let parent = node.parent()?;
    let parent_tag = parent.tag_name();
    if parent_tag != "ul" && parent_tag != "ol" {
        return None;
    }

    let list_style = node
        .style()
        .get("list-style-type")
        .or_else(|| parent.style().get("list-style-type"))
        .unwrap_or("");
    if list_style == "none" {
        return None;
    }

    let indent = Some(indent.unwrap_or(DEFAULT_BULLET_INDENT));
    if list_style.contains("decimal") || parent_tag == "ol" {
        let position = parent
            .element_children()
            .filter(|c| c.tag_name() == "li")
            .position(|c| c.id() == node.id())
            .map(|i| i as u32 + 1)
            .unwrap_or(1);
        let start = parent
            .attr("start")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1);
        return Some(Bullet {
            kind: BulletKind::Number,
            indent,
            number_start_at: Some(start + position - 1),
        });
    }

    Some(Bullet {
        kind: BulletKind::Bullet,
        indent,
        number_start_at: None,
    })
}
