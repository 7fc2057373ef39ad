use async_trait::async_trait;

use crate::dom::snapshot::NodeRef;
use crate::errors::Result;
use crate::extractors::position::relative_position;
use crate::extractors::stroke::{line_stroke, single_border_side, BorderSide};
use crate::extractors::typography::{extract_opacity, extract_rotation, extract_z_index};
use crate::models::common::{ElementType, Position};
use crate::models::elements::ElementDto;
use crate::models::line::LineElement;
use crate::models::shape_properties::StrokeStyle;
use crate::plugins::{ParseContext, Plugin, PluginCapabilities, PluginContext};

/// Horizontal rules and boxes drawn with a single border side.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinePlugin;

/// End points of the segment drawn by `side` of the node's box.
fn side_segment(parse: &ParseContext, side: BorderSide) -> (Position, Position) {
    let origin = relative_position(&parse.rect, &parse.slide_rect);
    let right = origin.left + parse.rect.width;
    let bottom = origin.top + parse.rect.height;
    match side {
        BorderSide::Top => (origin, Position::new(right, origin.top)),
        BorderSide::Bottom => (
            Position::new(origin.left, bottom),
            Position::new(right, bottom),
        ),
        BorderSide::Left => (origin, Position::new(origin.left, bottom)),
        BorderSide::Right => (
            Position::new(right, origin.top),
            Position::new(right, bottom),
        ),
    }
}

#[async_trait]
impl Plugin for LinePlugin {
    fn name(&self) -> &str {
        "core:line"
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new().parsing(&[ElementType::Line])
    }

    async fn on_parse(
        &self,
        _node: NodeRef<'_>,
        parse: &ParseContext,
        ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        let (side, stroke) = if parse.tag_name == "hr" {
            let mut stroke = line_stroke(&parse.style, BorderSide::Top);
            stroke.style = StrokeStyle::Solid;
            (BorderSide::Top, stroke)
        } else {
            let Some(side) = single_border_side(&parse.style) else {
                return Ok(None);
            };
            (side, line_stroke(&parse.style, side))
        };
        let (start, end) = side_segment(parse, side);

        Ok(Some(ElementDto::Line(LineElement {
            id: ctx.next_id("line"),
            start,
            end,
            stroke,
            z_index: extract_z_index(&parse.style),
            rotation: extract_rotation(&parse.style),
            opacity: extract_opacity(&parse.style),
        })))
    }
}
