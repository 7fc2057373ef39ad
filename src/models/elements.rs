// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::chart::ChartElement;
use crate::models::common::{Bounds, Dimensions, ElementType, Position};
use crate::models::image::ImageElement;
use crate::models::line::LineElement;
use crate::models::shape::ShapeElement;
use crate::models::table::TableElement;
use crate::models::text_element::TextElement;

/// Fields shared by every boxed element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    /// Unique within one conversion.
    pub id: String,

    /// Slide-relative top-left corner, in source pixels.
    pub position: Position,

    pub dimensions: Dimensions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,

    /// Rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    /// Opacity in `0.0..1.0`; absent means fully opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ElementBase {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_parts(self.position, self.dimensions)
    }
}

/// A visual element of a slide, tagged by its kind.
/// The JSON representation carries the kind in a `type` field next to the element's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementDto {
    Text(TextElement),
    Shape(ShapeElement),
    Image(ImageElement),
    Line(LineElement),
    Table(TableElement),
    Chart(ChartElement),
}

impl ElementDto {
    pub fn id(&self) -> &str {
        match self {
            ElementDto::Line(line) => &line.id,
            other => other.base().map(|b| b.id.as_str()).unwrap_or_default(),
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ElementDto::Text(_) => ElementType::Text,
            ElementDto::Shape(_) => ElementType::Shape,
            ElementDto::Image(_) => ElementType::Image,
            ElementDto::Line(_) => ElementType::Line,
            ElementDto::Table(_) => ElementType::Table,
            ElementDto::Chart(_) => ElementType::Chart,
        }
    }

    /// The common box fields. Lines have no box and return `None`.
    pub fn base(&self) -> Option<&ElementBase> {
        match self {
            ElementDto::Text(e) => Some(&e.base),
            ElementDto::Shape(e) => Some(&e.base),
            ElementDto::Image(e) => Some(&e.base),
            ElementDto::Table(e) => Some(&e.base),
            ElementDto::Chart(e) => Some(&e.base),
            ElementDto::Line(_) => None,
        }
    }

    pub fn base_mut(&mut self) -> Option<&mut ElementBase> {
        match self {
            ElementDto::Text(e) => Some(&mut e.base),
            ElementDto::Shape(e) => Some(&mut e.base),
            ElementDto::Image(e) => Some(&mut e.base),
            ElementDto::Table(e) => Some(&mut e.base),
            ElementDto::Chart(e) => Some(&mut e.base),
            ElementDto::Line(_) => None,
        }
    }

    /// Bounding box of the element. For lines this is the box spanned by the end points.
    pub fn bounds(&self) -> Bounds {
        match self {
            ElementDto::Line(line) => {
                let left = line.start.left.min(line.end.left);
                let top = line.start.top.min(line.end.top);
                Bounds {
                    left,
                    top,
                    width: (line.end.left - line.start.left).abs(),
                    height: (line.end.top - line.start.top).abs(),
                }
            }
            other => other.base().map(ElementBase::bounds).unwrap_or_default(),
        }
    }

    pub fn z_index(&self) -> Option<i32> {
        match self {
            ElementDto::Line(line) => line.z_index,
            other => other.base().and_then(|b| b.z_index),
        }
    }
}
