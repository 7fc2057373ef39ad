//! Maps a [`PresentationDto`] onto the add-operations of a [`DeckDocument`].
//!
//! The mapping is a pure function of its input: serializing the same presentation twice
//! yields identical documents. Identifiers and timestamps come from the presentation and
//! are never generated here.

mod chart;
mod image;
mod line;
mod shape;
mod table;
mod text;
pub mod units;

use log::debug;

use crate::deck::{DeckDocument, DeckLayout, DeckProperties, DeckSlide, FillSpec, SlideObject};
use crate::models::elements::ElementDto;
use crate::models::page::{SlideBackground, SlideDto};
use crate::models::presentation::PresentationDto;
use crate::models::shape_properties::Fill;

pub use chart::{chart_type_name, data_label_format, serialize_chart};
pub use image::serialize_image;
pub use line::serialize_line;
pub use shape::{fill_spec, line_spec, serialize_shape};
pub use table::serialize_table;
pub use text::{font_face, serialize_text, text_style};
pub use units::{px_to_inches, px_to_percent, px_to_points, FrameMapper, Units};

/// Name of the slide layout sized to the source viewport.
pub const LAYOUT_NAME: &str = "CUSTOM";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Serializer {
    units: Units,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn serialize(&self, presentation: &PresentationDto) -> DeckDocument {
        let mapper = FrameMapper::new(presentation.dimensions, self.units);
        let metadata = &presentation.metadata;
        let document = DeckDocument {
            layout: DeckLayout {
                name: LAYOUT_NAME.to_string(),
                width: px_to_inches(presentation.dimensions.width),
                height: px_to_inches(presentation.dimensions.height),
            },
            properties: DeckProperties {
                title: metadata.title.clone(),
                author: metadata.author.clone(),
                subject: metadata.subject.clone(),
                company: metadata.company.clone(),
                created_at: metadata.created_at,
            },
            slides: presentation
                .slides
                .iter()
                .map(|slide| self.serialize_slide(slide, &mapper))
                .collect(),
        };
        debug!(
            "Serialized {} slide(s) into {} object(s)",
            document.slides.len(),
            document.object_count()
        );
        document
    }

    pub fn serialize_slide(&self, slide: &SlideDto, mapper: &FrameMapper) -> DeckSlide {
        DeckSlide {
            background: slide.background.as_ref().and_then(background_spec),
            objects: slide
                .elements
                .iter()
                .flat_map(|element| serialize_element(element, mapper))
                .collect(),
        }
    }
}

fn background_spec(background: &SlideBackground) -> Option<FillSpec> {
    match &background.fill {
        Fill::Image { src, .. } => Some(FillSpec {
            path: Some(src.clone()),
            ..Default::default()
        }),
        fill => fill_spec(fill),
    }
}

/// Add-operations for one element, in drawing order.
pub fn serialize_element(element: &ElementDto, mapper: &FrameMapper) -> Vec<SlideObject> {
    match element {
        ElementDto::Text(text) => vec![SlideObject::Text(serialize_text(text, mapper))],
        ElementDto::Shape(shape) => serialize_shape(shape, mapper),
        ElementDto::Image(image) => vec![SlideObject::Image(serialize_image(image, mapper))],
        ElementDto::Line(line) => vec![SlideObject::Line(serialize_line(line, mapper))],
        ElementDto::Table(table) => vec![SlideObject::Table(serialize_table(table, mapper))],
        ElementDto::Chart(chart) => vec![SlideObject::Chart(serialize_chart(chart))],
    }
}
