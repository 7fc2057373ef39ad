use async_trait::async_trait;

use super::element_base;
use crate::dom::snapshot::NodeRef;
use crate::errors::Result;
use crate::extractors::shape::{
    extract_border_radius, extract_fill, extract_shadow, extract_stroke, shape_type,
};
use crate::models::common::ElementType;
use crate::models::elements::ElementDto;
use crate::models::shape::ShapeElement;
use crate::plugins::{ParseContext, Plugin, PluginCapabilities, PluginContext};

/// Boxes with a visible background, border, shadow or rounded corners.
///
/// The slide root's own background is carried by the slide and is not emitted here.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapePlugin;

#[async_trait]
impl Plugin for ShapePlugin {
    fn name(&self) -> &str {
        "core:shape"
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new().parsing(&[ElementType::Shape])
    }

    async fn on_parse(
        &self,
        node: NodeRef<'_>,
        parse: &ParseContext,
        ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        if parse.is_slide_root(&node) {
            return Ok(None);
        }
        let style = &parse.style;
        let fill = extract_fill(style);
        let stroke = extract_stroke(style);
        let border_radius = extract_border_radius(style, &parse.rect);
        let shadow = extract_shadow(style);
        if fill.is_none() && stroke.is_none() && shadow.is_none() && border_radius.is_none() {
            return Ok(None);
        }

        Ok(Some(ElementDto::Shape(ShapeElement {
            base: element_base("shape", parse, ctx),
            shape_type: shape_type(border_radius, &parse.rect),
            fill,
            stroke,
            border_radius,
            shadow,
        })))
    }
}
