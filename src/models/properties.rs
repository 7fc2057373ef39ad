// src/models/properties.rs

use serde::{Deserialize, Serialize};

/// Font style limited to the values a presentation backend can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn is_slanted(&self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::Oblique)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Represents the typography that can be applied to a text element, a run or a table cell.
/// Unset properties are inherited from the enclosing run when runs are flattened.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// The primary font face, quote-stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Font size in source pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    /// Numeric font weight as a string ("400", "700", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,

    /// Letter spacing in source pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,

    /// Line height in source pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,

    /// Text color as a 6-digit lowercase hex string without `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
}

impl Typography {
    /// Returns the numeric font weight, defaulting to 400 when unset or unparseable.
    pub fn weight(&self) -> u32 {
        self.font_weight
            .as_deref()
            .and_then(|w| w.parse::<u32>().ok())
            .unwrap_or(400)
    }

    /// Merges `self` (the more specific style) over `inherited`.
    /// Properties set on `self` take precedence; unset ones are taken from `inherited`.
    pub fn merged_over(&self, inherited: &Typography) -> Typography {
        Typography {
            font_family: self
                .font_family
                .clone()
                .or_else(|| inherited.font_family.clone()),
            font_size: self.font_size.or(inherited.font_size),
            font_weight: self
                .font_weight
                .clone()
                .or_else(|| inherited.font_weight.clone()),
            font_style: self.font_style.or(inherited.font_style),
            letter_spacing: self.letter_spacing.or(inherited.letter_spacing),
            line_height: self.line_height.or(inherited.line_height),
            color: self.color.clone().or_else(|| inherited.color.clone()),
            underline: self.underline.or(inherited.underline),
            strikethrough: self.strikethrough.or(inherited.strikethrough),
            text_align: self.text_align.or(inherited.text_align),
            vertical_align: self.vertical_align.or(inherited.vertical_align),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_specific_values() {
        let parent = Typography {
            color: Some("ff0000".to_string()),
            font_weight: Some("400".to_string()),
            font_size: Some(16.0),
            ..Default::default()
        };
        let child = Typography {
            font_weight: Some("700".to_string()),
            font_style: Some(FontStyle::Italic),
            ..Default::default()
        };

        let merged = child.merged_over(&parent);
        assert_eq!(merged.font_weight.as_deref(), Some("700"));
        assert_eq!(merged.font_style, Some(FontStyle::Italic));
        assert_eq!(merged.color.as_deref(), Some("ff0000"));
        assert_eq!(merged.font_size, Some(16.0));
    }

    #[test]
    fn test_weight_defaults_to_regular() {
        assert_eq!(Typography::default().weight(), 400);
        let bold = Typography {
            font_weight: Some("700".to_string()),
            ..Default::default()
        };
        assert_eq!(bold.weight(), 700);
    }
}
