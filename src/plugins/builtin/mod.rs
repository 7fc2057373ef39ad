//! The plugins every converter registers unless told otherwise.

pub mod chart_overlay;
pub mod icon;
pub mod image;
pub mod line;
pub mod shape;
pub mod table;
pub mod text;

pub use chart_overlay::ChartOverlayPlugin;
pub use icon::IconPlugin;
pub use image::ImagePlugin;
pub use line::LinePlugin;
pub use shape::ShapePlugin;
pub use table::TablePlugin;
pub use text::TextPlugin;

use super::{ParseContext, Plugin, PluginContext};
use crate::extractors::position::dimensions;
use crate::extractors::typography::{extract_opacity, extract_rotation, extract_z_index};
use crate::models::elements::ElementBase;

/// The standard plugin set in registration order: chart overlay, icon, image, table,
/// line, shape, text.
pub fn default_core_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(ChartOverlayPlugin),
        Box::new(IconPlugin::default()),
        Box::new(ImagePlugin),
        Box::new(TablePlugin),
        Box::new(LinePlugin),
        Box::new(ShapePlugin),
        Box::new(TextPlugin),
    ]
}

/// Common fields of a boxed element placed at the node's slide-relative rectangle.
pub(crate) fn element_base(prefix: &str, parse: &ParseContext, ctx: &PluginContext) -> ElementBase {
    ElementBase {
        id: ctx.next_id(prefix),
        position: parse.position(),
        dimensions: dimensions(&parse.rect, 1.0),
        z_index: extract_z_index(&parse.style),
        rotation: extract_rotation(&parse.style),
        opacity: extract_opacity(&parse.style),
    }
}
