// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::ElementDto;
use crate::models::shape_properties::Fill;

/// The background of a slide, taken from the slide root's own fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideBackground {
    pub fill: Fill,
}

/// One slide: its elements in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDto {
    pub id: String,

    /// Zero-based position of the slide in the deck.
    pub order: usize,

    pub elements: Vec<ElementDto>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<SlideBackground>,
}

impl SlideDto {
    pub fn new(id: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            order,
            elements: Vec::new(),
            background: None,
        }
    }
}
