// src/models/presentation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::Dimensions;
use crate::models::page::SlideDto;

/// Descriptive metadata carried into the generated document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Names of the plugins that took part in the conversion, in registration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
}

/// The complete result of a conversion: the slides plus the viewport they were measured in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationDto {
    pub slides: Vec<SlideDto>,
    pub metadata: PresentationMetadata,
    pub dimensions: Dimensions,
}

impl PresentationDto {
    /// Total number of elements across all slides.
    pub fn element_count(&self) -> usize {
        self.slides.iter().map(|s| s.elements.len()).sum()
    }
}
