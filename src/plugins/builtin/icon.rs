use async_trait::async_trait;
use log::warn;
use std::sync::Arc;

use super::element_base;
use crate::constants::DEFAULT_TEXT_COLOR;
use crate::dom::snapshot::NodeRef;
use crate::errors::Result;
use crate::extractors::color::sanitize_color;
use crate::extractors::icon::{detect_icon_variant, icon_glyph, IconCache};
use crate::models::common::ElementType;
use crate::models::elements::ElementDto;
use crate::models::image::ImageElement;
use crate::plugins::{ParseContext, Plugin, PluginCapabilities, PluginContext};

/// Font Awesome glyphs, emitted as images tinted with the element's text color.
#[derive(Debug, Default, Clone)]
pub struct IconPlugin {
    cache: Option<Arc<IconCache>>,
}

impl IconPlugin {
    /// Uses `cache` instead of the process-wide one.
    pub fn with_cache(cache: Arc<IconCache>) -> Self {
        Self { cache: Some(cache) }
    }

    fn cache(&self) -> &IconCache {
        match self.cache.as_deref() {
            Some(cache) => cache,
            None => IconCache::global(),
        }
    }
}

#[async_trait]
impl Plugin for IconPlugin {
    fn name(&self) -> &str {
        "core:icon"
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new().parsing(&[ElementType::Image])
    }

    async fn on_parse(
        &self,
        node: NodeRef<'_>,
        parse: &ParseContext,
        ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        if !matches!(node.tag_name(), "i" | "span") {
            return Ok(None);
        }
        let Some(glyph) = icon_glyph(node.class_list()) else {
            return Ok(None);
        };
        let variant = detect_icon_variant(node.class_list());

        let svg = match self.cache().get_or_fetch(variant, &glyph).await {
            Ok(svg) => svg,
            Err(e) => {
                warn!("Skipping icon <{} class=\"{glyph}\">: {e}", parse.tag_name);
                return Ok(None);
            }
        };

        let color = sanitize_color(parse.style.value("color"));
        let color = if color.is_empty() {
            DEFAULT_TEXT_COLOR.to_string()
        } else {
            color
        };

        Ok(Some(ElementDto::Image(ImageElement {
            base: element_base("icon", parse, ctx),
            src: svg.to_data_uri(&color),
            alt: Some(glyph),
            fit: None,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;
    use crate::dom::snapshot::Rect;
    use crate::extractors::icon::IconSource;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    struct OneGlyph;

    #[async_trait]
    impl IconSource for OneGlyph {
        async fn fetch_svg(&self, url: &str) -> Result<Option<String>> {
            Ok(url.ends_with("/solid/star.svg").then(|| {
                r#"<svg viewBox="0 0 576 512"><path d="M316.9 18"/></svg>"#.to_string()
            }))
        }
    }

    fn plugin() -> IconPlugin {
        IconPlugin::with_cache(Arc::new(IconCache::new(Arc::new(OneGlyph))))
    }

    #[test]
    fn test_default_plugin_shares_the_global_cache() {
        assert!(std::ptr::eq(IconPlugin::default().cache(), IconCache::global()));
        let own = plugin();
        assert!(!std::ptr::eq(own.cache(), IconCache::global()));
    }

    #[tokio::test]
    async fn test_glyph_is_tinted_with_text_color() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let icon = b
            .element(root, "i", Rect::new(4.0, 4.0, 16.0, 16.0))
            .class("fa-solid fa-star")
            .style("color", "rgb(255, 200, 0)")
            .id();
        let doc = b.build();
        let node = doc.node(icon).unwrap();
        let parse = ParseContext::new(&node, ElementType::Image, 0, &doc.root());

        let Some(ElementDto::Image(image)) = plugin()
            .on_parse(node, &parse, &mut PluginContext::default())
            .await
            .unwrap()
        else {
            panic!("expected an image");
        };
        assert_eq!(image.alt.as_deref(), Some("star"));
        let svg = STANDARD
            .decode(image.src.trim_start_matches("data:image/svg+xml;base64,"))
            .unwrap();
        assert!(String::from_utf8(svg).unwrap().contains("#ffc800"));
    }

    #[tokio::test]
    async fn test_unresolved_glyph_is_omitted() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let icon = b
            .element(root, "i", Rect::new(0.0, 0.0, 16.0, 16.0))
            .class("fa-regular fa-nothing-here")
            .id();
        let doc = b.build();
        let node = doc.node(icon).unwrap();
        let parse = ParseContext::new(&node, ElementType::Image, 0, &doc.root());
        let element = plugin()
            .on_parse(node, &parse, &mut PluginContext::default())
            .await
            .unwrap();
        assert!(element.is_none());
    }
}
