// src/models/line.rs

use serde::{Deserialize, Serialize};

use crate::models::common::Position;
use crate::models::shape_properties::Stroke;

/// A straight connector. Unlike other elements it has no box, only two end points
/// (slide-relative, source pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub id: String,
    pub start: Position,
    pub end: Position,
    pub stroke: Stroke,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}
