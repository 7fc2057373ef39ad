use async_trait::async_trait;

use super::element_base;
use crate::dom::snapshot::NodeRef;
use crate::errors::Result;
use crate::extractors::list::extract_bullet;
use crate::extractors::position::{text_box, text_width_buffer};
use crate::extractors::text::{extract_runs, extract_text_content, icon_offset, leading_icon};
use crate::extractors::typography::{extract_padding, extract_typography};
use crate::models::common::ElementType;
use crate::models::elements::ElementDto;
use crate::models::text_element::{TextElement, TextType};
use crate::plugins::{ParseContext, Plugin, PluginCapabilities, PluginContext};

const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Text blocks: headings, paragraphs, list items and styled inline text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPlugin;

#[async_trait]
impl Plugin for TextPlugin {
    fn name(&self) -> &str {
        "core:text"
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new().parsing(&[ElementType::Text])
    }

    async fn on_parse(
        &self,
        node: NodeRef<'_>,
        parse: &ParseContext,
        ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        let content = extract_text_content(node);
        if content.is_empty() {
            return Ok(None);
        }

        let icon = leading_icon(node);
        let runs = extract_runs(node, icon.map(|i| i.id()));
        if runs.is_empty() {
            return Ok(None);
        }

        let typography = extract_typography(&parse.style);
        let buffer = ctx.config.text_width_buffer.unwrap_or_else(|| {
            text_width_buffer(typography.font_size.unwrap_or(DEFAULT_FONT_SIZE))
        });
        let (position, dimensions) = text_box(
            &parse.rect,
            &parse.slide_rect,
            buffer,
            icon.as_ref().map(icon_offset),
        );

        let mut base = element_base("text", parse, ctx);
        base.position = position;
        base.dimensions = dimensions;

        let padding = extract_padding(&parse.style);
        Ok(Some(ElementDto::Text(TextElement {
            base,
            text_type: TextType::from_tag(&parse.tag_name),
            content,
            runs,
            typography,
            padding: (!padding.is_zero()).then_some(padding),
            bullet: extract_bullet(node, None),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;
    use crate::dom::snapshot::Rect;
    use crate::models::bullet::BulletKind;

    #[tokio::test]
    async fn test_heading_with_offset_slide() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let slide = b
            .element(root, "div", Rect::new(100.0, 50.0, 992.0, 558.0))
            .class("slide")
            .id();
        let h1 = b
            .element(slide, "h1", Rect::new(140.0, 80.0, 300.0, 48.0))
            .styles(&[
                ("font-size", "40px"),
                ("font-weight", "700"),
                ("padding-left", "4px"),
            ])
            .id();
        b.text(h1, "Quarterly   review");
        let doc = b.build();
        let node = doc.node(h1).unwrap();
        let parse = ParseContext::new(&node, ElementType::Text, 0, &doc.node(slide).unwrap());
        let mut ctx = PluginContext::default();

        let element = TextPlugin.on_parse(node, &parse, &mut ctx).await.unwrap();
        let Some(ElementDto::Text(text)) = element else {
            panic!("expected a text element");
        };
        assert_eq!(text.text_type, TextType::H1);
        assert_eq!(text.content, "Quarterly review");
        assert_eq!(text.base.position.left, 40.0);
        assert_eq!(text.base.position.top, 30.0);
        assert!((text.base.dimensions.width - 300.0 * 1.06).abs() < 1e-9);
        assert_eq!(text.base.dimensions.height, 48.0);
        assert_eq!(text.padding.map(|p| p.left), Some(4.0));
        assert!(text.bullet.is_none());
    }

    #[tokio::test]
    async fn test_list_item_bullet_and_fixed_buffer() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let ol = b.element(root, "ol", Rect::new(0.0, 0.0, 200.0, 40.0)).id();
        let li = b.element(ol, "li", Rect::new(0.0, 0.0, 100.0, 20.0)).id();
        b.text(li, "First");
        let doc = b.build();
        let node = doc.node(li).unwrap();
        let parse = ParseContext::new(&node, ElementType::Text, 0, &doc.root());
        let mut ctx = PluginContext::default();
        ctx.config.text_width_buffer = Some(1.5);

        let Some(ElementDto::Text(text)) =
            TextPlugin.on_parse(node, &parse, &mut ctx).await.unwrap()
        else {
            panic!("expected a text element");
        };
        assert_eq!(text.base.dimensions.width, 150.0);
        let bullet = text.bullet.unwrap();
        assert_eq!(bullet.kind, BulletKind::Number);
        assert_eq!(bullet.number_start_at, Some(1));
    }

    #[tokio::test]
    async fn test_whitespace_only_yields_nothing() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let p = b.element(root, "p", Rect::new(0.0, 0.0, 10.0, 10.0)).id();
        b.text(p, "  \n ");
        let doc = b.build();
        let node = doc.node(p).unwrap();
        let parse = ParseContext::new(&node, ElementType::Text, 0, &doc.root());
        let element = TextPlugin
            .on_parse(node, &parse, &mut PluginContext::default())
            .await
            .unwrap();
        assert!(element.is_none());
    }
}
