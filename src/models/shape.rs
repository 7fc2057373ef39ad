// src/models/shape.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::ElementBase;
use crate::models::shape_properties::{Fill, Shadow, ShapeType, Stroke};

/// A filled and/or outlined box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub shape_type: ShapeType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,

    /// Corner radius in source pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}
