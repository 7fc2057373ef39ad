// src/models/image.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::ElementBase;
use crate::models::shape_properties::ImageFit;

/// A raster or vector picture. `src` is a URL, a file path or a `data:` URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub src: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
}

impl ImageElement {
    pub fn is_data_uri(&self) -> bool {
        self.src.starts_with("data:")
    }
}
