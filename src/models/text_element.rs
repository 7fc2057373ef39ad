// src/models/text_element.rs

use serde::{Deserialize, Serialize};

use crate::models::bullet::Bullet;
use crate::models::common::Padding;
use crate::models::elements::ElementBase;
use crate::models::properties::Typography;
use crate::models::text::TextRuns;

/// The semantic role of a text block, taken from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    #[default]
    Body,
}

impl TextType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" => TextType::H1,
            "h2" => TextType::H2,
            "h3" => TextType::H3,
            "h4" => TextType::H4,
            "h5" => TextType::H5,
            "h6" => TextType::H6,
            "p" => TextType::P,
            _ => TextType::Body,
        }
    }
}

/// A text box. `runs` holds the styled spans; `typography` is the block-level style
/// every run falls back to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub text_type: TextType,

    /// Plain text of the block, whitespace-collapsed.
    pub content: String,

    pub runs: TextRuns,

    pub typography: Typography,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}
