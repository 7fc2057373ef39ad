use async_trait::async_trait;
use log::debug;

use super::element_base;
use crate::dom::snapshot::NodeRef;
use crate::errors::Result;
use crate::extractors::icon::{is_icon_element, svg_data_uri};
use crate::models::common::ElementType;
use crate::models::elements::ElementDto;
use crate::models::image::ImageElement;
use crate::models::shape_properties::ImageFit;
use crate::plugins::{ParseContext, Plugin, PluginCapabilities, PluginContext};

/// `img`, `picture` and inline `svg` pictures.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImagePlugin;

fn image_src(node: &NodeRef<'_>) -> Option<String> {
    let src = match node.tag_name() {
        "img" => node.attr("src").map(str::to_string),
        "picture" => node
            .query_selector("img")
            .ok()
            .flatten()
            .and_then(|img| img.attr("src"))
            .map(str::to_string),
        "svg" => Some(svg_data_uri(&node.outer_html())),
        _ => None,
    }?;
    (!src.trim().is_empty()).then_some(src)
}

fn image_alt(node: &NodeRef<'_>) -> Option<String> {
    let alt = match node.tag_name() {
        "img" => node.attr("alt").map(str::to_string),
        "svg" => node
            .element_children()
            .find(|c| c.tag_name() == "title")
            .map(|title| title.text_content()),
        _ => None,
    }?;
    (!alt.is_empty()).then_some(alt)
}

fn object_fit(value: &str) -> Option<ImageFit> {
    match value {
        "cover" => Some(ImageFit::Cover),
        "contain" | "scale-down" => Some(ImageFit::Contain),
        _ => None,
    }
}

#[async_trait]
impl Plugin for ImagePlugin {
    fn name(&self) -> &str {
        "core:image"
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
        if is_icon_element(&node) {
            return Ok(None);
        }
        let Some(src) = image_src(&node) else {
            debug!("<{}> has no image source, skipping", parse.tag_name);
            return Ok(None);
        };

        Ok(Some(ElementDto::Image(ImageElement {
            base: element_base("image", parse, ctx),
            src,
            alt: image_alt(&node),
            fit: object_fit(parse.style.value("object-fit")),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::SnapshotBuilder;
    use crate::dom::snapshot::{DomSnapshot, NodeId, Rect};

    async fn parse_image(doc: &DomSnapshot, id: NodeId) -> Option<ImageElement> {
        let node = doc.node(id).unwrap();
        let parse = ParseContext::new(&node, ElementType::Image, 0, &doc.root());
        match ImagePlugin
            .on_parse(node, &parse, &mut PluginContext::default())
            .await
            .unwrap()
        {
            Some(ElementDto::Image(image)) => Some(image),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_img_and_picture() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let img = b
            .element(root, "img", Rect::new(10.0, 10.0, 64.0, 64.0))
            .attr("src", "logo.png")
            .attr("alt", "Logo")
            .style("object-fit", "cover")
            .id();
        let picture = b.element(root, "picture", Rect::new(0.0, 0.0, 50.0, 50.0)).id();
        b.element(picture, "img", Rect::default())
            .attr("src", "hero.webp");
        let empty = b
            .element(root, "img", Rect::new(0.0, 0.0, 1.0, 1.0))
            .attr("src", "")
            .id();
        let doc = b.build();

        let image = parse_image(&doc, img).await.unwrap();
        assert_eq!(image.src, "logo.png");
        assert_eq!(image.alt.as_deref(), Some("Logo"));
        assert_eq!(image.fit, Some(ImageFit::Cover));
        assert_eq!(image.base.dimensions.width, 64.0);

        assert_eq!(parse_image(&doc, picture).await.unwrap().src, "hero.webp");
        assert!(parse_image(&doc, empty).await.is_none());
    }

    #[tokio::test]
    async fn test_inline_svg_becomes_data_uri() {
        let mut b = SnapshotBuilder::new();
        let root = b.root();
        let svg = b
            .element(root, "svg", Rect::new(0.0, 0.0, 24.0, 24.0))
            .attr("viewBox", "0 0 24 24")
            .id();
        let title = b.element(svg, "title", Rect::default()).id();
        b.text(title, "Check");
        b.element(svg, "path", Rect::default()).attr("d", "M0 0L24 24");
        let doc = b.build();

        let image = parse_image(&doc, svg).await.unwrap();
        assert!(image.src.starts_with("data:image/svg+xml;base64,"));
        assert_eq!(image.alt.as_deref(), Some("Check"));
    }
}
