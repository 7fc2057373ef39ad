//! Strokes derived from CSS borders.

use super::color::{parse_color_opacity, sanitize_color};
use crate::dom::style::ComputedStyle;
use crate::models::shape_properties::{Border, Stroke, StrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl BorderSide {
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Top,
        BorderSide::Right,
        BorderSide::Bottom,
        BorderSide::Left,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BorderSide::Top => "top",
            BorderSide::Right => "right",
            BorderSide::Bottom => "bottom",
            BorderSide::Left => "left",
        }
    }

    fn property(&self, suffix: &str) -> String {
        format!("border-{}-{}", self.name(), suffix)
    }
}

pub fn stroke_style(value: &str) -> StrokeStyle {
    match value.trim() {
        "dashed" => StrokeStyle::Dashed,
        "dotted" => StrokeStyle::Dotted,
        _ => StrokeStyle::Solid,
    }
}

/// Builds a stroke from border components. Returns `None` for a zero width or a
/// color that cannot be parsed.
pub fn stroke_from_border(color: &str, width: f64, style: &str) -> Option<Stroke> {
    if !(width > 0.0) {
        return None;
    }
    let hex = sanitize_color(color);
    if hex.is_empty() {
        return None;
    }
    Some(Stroke {
        color: hex,
        width,
        style: stroke_style(style),
        opacity: parse_color_opacity(color),
    })
}

/// Width of one border side, `0` when its style hides it.
pub fn side_width(style: &ComputedStyle, side: BorderSide) -> f64 {
    let border_style = style.value(&side.property("style"));
    if border_style == "none" || border_style == "hidden" {
        return 0.0;
    }
    style.px_or_zero(&side.property("width"))
}

/// A side counts as visible when it has width and a non-transparent color.
fn side_visible(style: &ComputedStyle, side: BorderSide) -> bool {
    side_width(style, side) > 0.0 && !sanitize_color(style.value(&side.property("color"))).is_empty()
}

pub fn side_stroke(style: &ComputedStyle, side: BorderSide) -> Option<Stroke> {
    stroke_from_border(
        style.value(&side.property("color")),
        side_width(style, side),
        style.value(&side.property("style")),
    )
}

/// The only visible border side, if exactly one side is visible.
pub fn single_border_side(style: &ComputedStyle) -> Option<BorderSide> {
    let mut visible = BorderSide::ALL
        .iter()
        .copied()
        .filter(|side| side_visible(style, *side));
    match (visible.next(), visible.next()) {
        (Some(side), None) => Some(side),
        _ => None,
    }
}

/// A stroke for a border that is identical on all four sides.
pub fn uniform_border(style: &ComputedStyle) -> Option<Stroke> {
    let strokes: Vec<Option<Stroke>> = BorderSide::ALL
        .iter()
        .map(|side| side_stroke(style, *side))
        .collect();
    let first = strokes.first().cloned().flatten()?;
    strokes
        .iter()
        .all(|s| s.as_ref() == Some(&first))
        .then_some(first)
}

/// Per-side strokes, or `None` when no side has a width.
pub fn extract_border(style: &ComputedStyle) -> Option<Border> {
    if BorderSide::ALL.iter().all(|side| side_width(style, *side) == 0.0) {
        return None;
    }
    Some(Border {
        top: side_stroke(style, BorderSide::Top),
        right: side_stroke(style, BorderSide::Right),
        bottom: side_stroke(style, BorderSide::Bottom),
        left: side_stroke(style, BorderSide::Left),
    })
}

/// Stroke of a line drawn from one border side. Missing width and color fall back
/// to a 1px black line.
pub fn line_stroke(style: &ComputedStyle, side: BorderSide) -> Stroke {
    let width = style
        .px(&side.property("width"))
        .filter(|w| *w > 0.0)
        .unwrap_or(1.0);
    let color = style.value(&side.property("color"));
    let hex = sanitize_color(color);
    Stroke {
        color: if hex.is_empty() { "000000".to_string() } else { hex },
        width,
        style: stroke_style(style.value(&side.property("style"))),
        opacity: parse_color_opacity(color),
    }
}
