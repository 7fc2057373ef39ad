use serde::{Deserialize, Serialize};

// --- Enums (GradientType, StrokeStyle, ShadowType, ShapeType, ImageFit) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Linear,
    Radial,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowType {
    Outer,
    Inner,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    #[default]
    Rect,
    RoundRect,
    Ellipse,
    Triangle,
    Custom,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Cover,
    Contain,
    Stretch,
}

// --- Structs (GradientStop, Fill, Stroke, Border, ShadowOffset, Shadow) ---

/// A single color stop of a gradient. `position` is normalized to `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub color: String,
    pub position: f64,
}

/// The fill of a shape, table cell or slide background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Fill {
    /// A solid color fill. `opacity` is only set when below 1.
    Solid {
        color: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        opacity: Option<f64>,
    },
    /// A linear or radial gradient with at least two stops.
    #[serde(rename_all = "camelCase")]
    Gradient {
        gradient_type: GradientType,
        #[serde(skip_serializing_if = "Option::is_none")]
        angle: Option<f64>,
        stops: Vec<GradientStop>,
    },
    /// An image fill referenced by URL or data URI.
    Image {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fit: Option<ImageFit>,
    },
}

/// An outline derived from a CSS border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub style: StrokeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Per-side strokes of a box (used by table cells).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Stroke>,
}

impl Border {
    /// Sides in the order top, right, bottom, left.
    pub fn sides(&self) -> [Option<&Stroke>; 4] {
        [
            self.top.as_ref(),
            self.right.as_ref(),
            self.bottom.as_ref(),
            self.left.as_ref(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowOffset {
    pub x: f64,
    pub y: f64,
}

/// A drop shadow decomposed from a CSS `box-shadow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    #[serde(rename = "type")]
    pub shadow_type: ShadowType,
    pub color: String,
    pub blur: f64,
    pub offset: ShadowOffset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}
