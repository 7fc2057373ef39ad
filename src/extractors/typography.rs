//! Typography and generic box properties (rotation, opacity, z-index, padding).

use once_cell::sync::Lazy;
use regex::Regex;

use super::color::sanitize_color;
use crate::constants::{DEFAULT_FONT_FAMILY, MIN_ROTATION_DEG};
use crate::dom::style::ComputedStyle;
use crate::models::common::Padding;
use crate::models::properties::{FontStyle, TextAlign, Typography, VerticalAlign};

static ROTATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rotate(?:Z)?\(\s*(-?[\d.]+)(deg|rad|turn|grad)?\s*\)").expect("valid rotate regex")
});

static MATRIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"matrix\(\s*(-?[\d.eE+-]+)\s*,\s*(-?[\d.eE+-]+)").expect("valid matrix regex")
});

/// Reduces a `font-family` list to its first face, quotes stripped.
pub fn sanitize_font_family(font_family: &str) -> String {
    font_family
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .find(|f| !f.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Normalizes `font-weight` to a numeric string.
pub fn font_weight(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(n) = value.parse::<f64>() {
        return Some((n as u32).to_string());
    }
    match value {
        "bold" | "bolder" => Some("700".to_string()),
        "lighter" => Some("300".to_string()),
        "normal" => Some("400".to_string()),
        _ => None,
    }
}

pub fn font_style(value: &str) -> Option<FontStyle> {
    match value.trim() {
        "italic" => Some(FontStyle::Italic),
        v if v.starts_with("oblique") => Some(FontStyle::Oblique),
        "normal" => Some(FontStyle::Normal),
        _ => None,
    }
}

pub fn text_align(value: &str) -> Option<TextAlign> {
    match value.trim() {
        "left" | "start" => Some(TextAlign::Left),
        "center" => Some(TextAlign::Center),
        "right" | "end" => Some(TextAlign::Right),
        "justify" => Some(TextAlign::Justify),
        _ => None,
    }
}

pub fn vertical_align(value: &str) -> Option<VerticalAlign> {
    match value.trim() {
        "top" | "text-top" => Some(VerticalAlign::Top),
        "middle" => Some(VerticalAlign::Middle),
        "bottom" | "text-bottom" => Some(VerticalAlign::Bottom),
        _ => None,
    }
}

fn decoration_line(style: &ComputedStyle) -> &str {
    style
        .get("text-decoration-line")
        .or_else(|| style.get("text-decoration"))
        .unwrap_or("")
}

/// Reads the full typography of an element.
///
/// Decorations are only recorded when present, so that a nested run without its own
/// decoration keeps the one it inherits.
pub fn extract_typography(style: &ComputedStyle) -> Typography {
    let family = sanitize_font_family(style.value("font-family"));
    let color = sanitize_color(style.value("color"));
    let decoration = decoration_line(style);

    Typography {
        font_family: Some(if family.is_empty() {
            DEFAULT_FONT_FAMILY.to_string()
        } else {
            family
        }),
        font_size: style.px("font-size").filter(|s| *s > 0.0),
        font_weight: font_weight(style.value("font-weight")),
        font_style: font_style(style.value("font-style")),
        letter_spacing: style.px("letter-spacing").filter(|s| *s != 0.0),
        line_height: style.px("line-height").filter(|s| *s > 0.0),
        color: (!color.is_empty()).then_some(color),
        underline: decoration.contains("underline").then_some(true),
        strikethrough: decoration.contains("line-through").then_some(true),
        text_align: text_align(style.value("text-align")),
        vertical_align: vertical_align(style.value("vertical-align")),
    }
}

/// Typography of a nested run: only what the run sets differently from its parent.
/// Properties equal to the parent's are left unset so the parent's value flows down.
pub fn extract_run_typography(style: &ComputedStyle, parent: &ComputedStyle) -> Typography {
    let own = extract_typography(style);
    let inherited = extract_typography(parent);
    Typography {
        font_family: own.font_family.filter(|f| Some(f) != inherited.font_family.as_ref()),
        font_size: own.font_size.filter(|s| Some(*s) != inherited.font_size),
        font_weight: own.font_weight.filter(|w| Some(w) != inherited.font_weight.as_ref()),
        font_style: own.font_style.filter(|s| Some(*s) != inherited.font_style),
        letter_spacing: own
            .letter_spacing
            .filter(|s| Some(*s) != inherited.letter_spacing),
        line_height: None,
        color: own.color.filter(|c| Some(c) != inherited.color.as_ref()),
        underline: own.underline,
        strikethrough: own.strikethrough,
        text_align: None,
        vertical_align: None,
    }
}

pub fn extract_padding(style: &ComputedStyle) -> Padding {
    Padding {
        top: style.px_or_zero("padding-top"),
        right: style.px_or_zero("padding-right"),
        bottom: style.px_or_zero("padding-bottom"),
        left: style.px_or_zero("padding-left"),
    }
}

/// Rotation in degrees from a 2D `transform`, from `rotate()` or decomposed from `matrix()`.
/// Rotations below 0.01° are treated as none.
pub fn extract_rotation(style: &ComputedStyle) -> Option<f64> {
    let transform = style.get("transform")?;
    if transform == "none" {
        return None;
    }

    let degrees = if let Some(caps) = ROTATE.captures(transform) {
        let value: f64 = caps[1].parse().ok()?;
        match caps.get(2).map(|m| m.as_str()) {
            Some("rad") => value.to_degrees(),
            Some("turn") => value * 360.0,
            Some("grad") => value * 0.9,
            _ => value,
        }
    } else if let Some(caps) = MATRIX.captures(transform) {
        let a: f64 = caps[1].parse().ok()?;
        let b: f64 = caps[2].parse().ok()?;
        b.atan2(a).to_degrees()
    } else {
        return None;
    };

    (degrees.is_finite() && degrees.abs() >= MIN_ROTATION_DEG).then_some(degrees)
}

/// Element opacity, or `None` when fully opaque.
pub fn extract_opacity(style: &ComputedStyle) -> Option<f64> {
    let opacity: f64 = style.get("opacity")?.parse().ok()?;
    (opacity.is_finite() && opacity < 1.0).then(|| opacity.max(0.0))
}

/// Stacking order, or `None` for `auto` and `0`.
pub fn extract_z_index(style: &ComputedStyle) -> Option<i32> {
    style
        .get("z-index")
        .and_then(|z| z.parse::<i32>().ok())
        .filter(|z| *z != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
        ComputedStyle::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_font_family_keeps_primary_face() {
        assert_eq!(sanitize_font_family("\"Open Sans\", Arial, sans-serif"), "Open Sans");
        assert_eq!(sanitize_font_family("'Roboto'"), "Roboto");
        assert_eq!(sanitize_font_family(""), "");
    }

    #[test]
    fn test_named_weights() {
        assert_eq!(font_weight("bold").as_deref(), Some("700"));
        assert_eq!(font_weight("bolder").as_deref(), Some("700"));
        assert_eq!(font_weight("lighter").as_deref(), Some("300"));
        assert_eq!(font_weight("normal").as_deref(), Some("400"));
        assert_eq!(font_weight("600").as_deref(), Some("600"));
        assert_eq!(font_weight("heavy"), None);
    }

    #[test]
    fn test_extract_typography() {
        let t = extract_typography(&style(&[
            ("font-family", "Inter, sans-serif"),
            ("font-size", "24px"),
            ("font-weight", "700"),
            ("font-style", "italic"),
            ("color", "rgb(51, 102, 153)"),
            ("text-decoration-line", "underline line-through"),
            ("text-align", "start"),
            ("line-height", "normal"),
        ]));
        assert_eq!(t.font_family.as_deref(), Some("Inter"));
        assert_eq!(t.font_size, Some(24.0));
        assert_eq!(t.font_weight.as_deref(), Some("700"));
        assert_eq!(t.font_style, Some(FontStyle::Italic));
        assert_eq!(t.color.as_deref(), Some("336699"));
        assert_eq!(t.underline, Some(true));
        assert_eq!(t.strikethrough, Some(true));
        assert_eq!(t.text_align, Some(TextAlign::Left));
        assert_eq!(t.line_height, None);
    }

    #[test]
    fn test_missing_family_falls_back_to_default() {
        let t = extract_typography(&ComputedStyle::new());
        assert_eq!(t.font_family.as_deref(), Some("Arial"));
        assert_eq!(t.underline, None);
    }

    #[test]
    fn test_run_typography_only_records_differences() {
        let parent = style(&[("color", "#ff0000"), ("font-weight", "400")]);
        let child = style(&[("color", "#ff0000"), ("font-weight", "700")]);
        let t = extract_run_typography(&child, &parent);
        assert_eq!(t.color, None);
        assert_eq!(t.font_weight.as_deref(), Some("700"));
    }

    #[test]
    fn test_rotation_from_rotate_and_matrix() {
        assert_eq!(
            extract_rotation(&style(&[("transform", "rotate(45deg)")])),
            Some(45.0)
        );
        let from_matrix = extract_rotation(&style(&[(
            "transform",
            "matrix(0.707107, 0.707107, -0.707107, 0.707107, 0, 0)",
        )]))
        .unwrap();
        assert!((from_matrix - 45.0).abs() < 0.001);
        assert_eq!(
            extract_rotation(&style(&[("transform", "matrix(1, 0.0001, 0, 1, 0, 0)")])),
            None
        );
        assert_eq!(extract_rotation(&style(&[("transform", "none")])), None);
    }

    #[test]
    fn test_opacity_and_z_index() {
        assert_eq!(extract_opacity(&style(&[("opacity", "1")])), None);
        assert_eq!(extract_opacity(&style(&[("opacity", "0.4")])), Some(0.4));
        assert_eq!(extract_z_index(&style(&[("z-index", "auto")])), None);
        assert_eq!(extract_z_index(&style(&[("z-index", "0")])), None);
        assert_eq!(extract_z_index(&style(&[("z-index", "3")])), Some(3));
    }
}
