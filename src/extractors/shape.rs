//! Fill, gradient, corner radius and shadow extraction.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::color::{parse_color, solid_fill};
use super::stroke::uniform_border;
use crate::dom::snapshot::Rect;
use crate::dom::style::{parse_px, ComputedStyle};
use crate::models::shape_properties::{
    Fill, GradientStop, GradientType, ImageFit, Shadow, ShadowOffset, ShadowType, ShapeType, Stroke,
};

static PX_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(-?[\d.]+)(?:px)?(?:\s|$)").expect("valid length regex"));

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(\s*["']?([^"')]+)["']?\s*\)"#).expect("valid url regex"));

const DIRECTION_ANGLES: &[(&str, f64)] = &[
    ("to top right", 45.0),
    ("to right top", 45.0),
    ("to bottom right", 135.0),
    ("to right bottom", 135.0),
    ("to bottom left", 225.0),
    ("to left bottom", 225.0),
    ("to top left", 315.0),
    ("to left top", 315.0),
    ("to top", 0.0),
    ("to right", 90.0),
    ("to bottom", 180.0),
    ("to left", 270.0),
];

/// Splits on commas that are not nested inside parentheses.
pub fn split_top_level(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts
}

/// The argument list of the first `name(...)` call in `value`.
fn function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    let start = value.find(&format!("{name}("))? + name.len() + 1;
    let mut depth = 1usize;
    for (i, c) in value[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&value[start..start + i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_angle(arg: &str) -> Option<f64> {
    let arg = arg.trim();
    let (number, factor) = if let Some(n) = arg.strip_suffix("deg") {
        (n, 1.0)
    } else if let Some(n) = arg.strip_suffix("grad") {
        (n, 0.9)
    } else if let Some(n) = arg.strip_suffix("rad") {
        (n, 180.0 / std::f64::consts::PI)
    } else if let Some(n) = arg.strip_suffix("turn") {
        (n, 360.0)
    } else {
        return None;
    };
    let degrees = number.trim().parse::<f64>().ok()? * factor;
    Some(degrees.rem_euclid(360.0))
}

/// Angle of a linear gradient from its first argument: an explicit angle or one of the
/// eight `to ...` keywords. Defaults to 180° (top to bottom).
pub fn gradient_angle(first_arg: &str) -> f64 {
    if let Some(angle) = parse_angle(first_arg) {
        return angle;
    }
    let normalized = first_arg.split_whitespace().collect::<Vec<_>>().join(" ");
    DIRECTION_ANGLES
        .iter()
        .find(|(keyword, _)| normalized == *keyword)
        .map(|(_, angle)| *angle)
        .unwrap_or(180.0)
}

fn is_direction_arg(arg: &str) -> bool {
    let arg = arg.trim();
    parse_angle(arg).is_some()
        || arg.starts_with("to ")
        || ["circle", "ellipse", "closest", "farthest", "at "]
            .iter()
            .any(|k| arg.starts_with(k))
}

/// Splits `"rgb(1, 2, 3) 40%"` into the color and an optional position in `0..=1`.
fn split_stop(stop: &str) -> (&str, Option<f64>) {
    let stop = stop.trim();
    if stop.ends_with(')') {
        return (stop, None);
    }
    match stop.rsplit_once(char::is_whitespace) {
        Some((color, pos)) if pos.ends_with('%') => {
            let position = pos
                .trim_end_matches('%')
                .parse::<f64>()
                .ok()
                .map(|p| (p / 100.0).clamp(0.0, 1.0));
            (color.trim(), position)
        }
        Some((color, pos)) if parse_px(pos).is_some() && pos.ends_with("px") => (color.trim(), None),
        _ => (stop, None),
    }
}

/// Parses comma-separated color stops (`"red 0%, blue 100%"`) in source order.
///
/// Stops whose color cannot be parsed are dropped. Missing positions default to 0 for
/// the first stop and 1 for the last; stops in between are spaced evenly between their
/// positioned neighbours.
pub fn parse_gradient_stops(stops: &str) -> Vec<GradientStop> {
    let parsed: Vec<(String, Option<f64>)> = split_top_level(stops)
        .into_iter()
        .filter(|part| !part.is_empty() && !is_direction_arg(part))
        .filter_map(|part| {
            let (color, position) = split_stop(part);
            let rgba = parse_color(color)?;
            Some((rgba.to_hex(), position))
        })
        .collect();

    let count = parsed.len();
    let mut positions: Vec<Option<f64>> = parsed.iter().map(|(_, p)| *p).collect();
    if let Some(first) = positions.first_mut() {
        first.get_or_insert(0.0);
    }
    if let Some(last) = positions.last_mut() {
        last.get_or_insert(1.0);
    }

    let mut i = 0;
    while i < count {
        if positions[i].is_some() {
            i += 1;
            continue;
        }
        let prev = i - 1;
        let next = (i..count).find(|j| positions[*j].is_some()).unwrap_or(count - 1);
        let from = positions[prev].unwrap_or(0.0);
        let to = positions[next].unwrap_or(1.0);
        let steps = (next - prev) as f64;
        for j in i..next {
            positions[j] = Some(from + (to - from) * (j - prev) as f64 / steps);
        }
        i = next;
    }

    parsed
        .into_iter()
        .zip(positions)
        .map(|((color, _), position)| GradientStop {
            color,
            position: position.unwrap_or(0.0),
        })
        .collect()
}

/// Parses a `linear-gradient(...)` or `radial-gradient(...)` value.
/// Returns `None` when fewer than two stops can be read.
pub fn parse_gradient(value: &str) -> Option<Fill> {
    let (gradient_type, args) = if let Some(args) = function_args(value, "linear-gradient") {
        (GradientType::Linear, args)
    } else if let Some(args) = function_args(value, "radial-gradient") {
        (GradientType::Radial, args)
    } else {
        return None;
    };

    let stops = parse_gradient_stops(args);
    if stops.len() < 2 {
        debug!("Discarding gradient with {} usable stops: {value}", stops.len());
        return None;
    }

    let angle = match gradient_type {
        GradientType::Linear => {
            let first = split_top_level(args).into_iter().next().unwrap_or("");
            Some(if is_direction_arg(first) {
                gradient_angle(first)
            } else {
                180.0
            })
        }
        GradientType::Radial => None,
    };

    Some(Fill::Gradient {
        gradient_type,
        angle,
        stops,
    })
}

fn image_fit(style: &ComputedStyle) -> Option<ImageFit> {
    match style.value("background-size") {
        "cover" => Some(ImageFit::Cover),
        "contain" => Some(ImageFit::Contain),
        "100% 100%" => Some(ImageFit::Stretch),
        _ => None,
    }
}

/// Fill of a box. Gradients win over the background color; a gradient that cannot be
/// parsed falls back to the solid color.
pub fn extract_fill(style: &ComputedStyle) -> Option<Fill> {
    let background_image = style.value("background-image");
    if !background_image.is_empty() && background_image != "none" {
        if background_image.contains("gradient(") {
            if let Some(gradient) = parse_gradient(background_image) {
                return Some(gradient);
            }
        } else if let Some(caps) = URL.captures(background_image) {
            return Some(Fill::Image {
                src: caps[1].trim().to_string(),
                fit: image_fit(style),
            });
        }
    }
    solid_fill(style.value("background-color"))
}

/// Outline of a box, when its border is the same on every side.
pub fn extract_stroke(style: &ComputedStyle) -> Option<Stroke> {
    uniform_border(style)
}

/// Corner radius in pixels. Percentages are resolved against the shorter side of `rect`.
pub fn extract_border_radius(style: &ComputedStyle, rect: &Rect) -> Option<f64> {
    let value = style
        .get("border-top-left-radius")
        .or_else(|| style.get("border-radius"))?;
    let first = value.split_whitespace().next().unwrap_or("");
    let radius = match first.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0 * rect.width.min(rect.height),
        None => parse_px(first)?,
    };
    (radius > 0.0).then_some(radius)
}

/// Geometric type of a box: an ellipse when a near-square box is rounded to at least
/// half its side, a rounded rectangle for any other radius.
pub fn shape_type(radius: Option<f64>, rect: &Rect) -> ShapeType {
    match radius {
        None => ShapeType::Rect,
        Some(r) => {
            let shorter = rect.width.min(rect.height);
            let near_square = (rect.width - rect.height).abs() <= 1.0;
            if near_square && shorter > 0.0 && r >= shorter / 2.0 {
                ShapeType::Ellipse
            } else {
                ShapeType::RoundRect
            }
        }
    }
}

/// Decomposes the first `box-shadow` layer. Returns `None` unless offset-x, offset-y and
/// blur can all be read.
pub fn extract_shadow(style: &ComputedStyle) -> Option<Shadow> {
    let value = style.get("box-shadow")?;
    if value == "none" {
        return None;
    }
    let layer = split_top_level(value).into_iter().next()?;

    let shadow_type = if layer.split_whitespace().any(|t| t == "inset") {
        ShadowType::Inner
    } else {
        ShadowType::Outer
    };

    let mut color_text = None;
    let mut rest = layer.to_string();
    for function in ["rgba(", "rgb("] {
        if let Some(start) = rest.find(function) {
            if let Some(end) = rest[start..].find(')') {
                color_text = Some(rest[start..=start + end].to_string());
                rest.replace_range(start..=start + end, " ");
                break;
            }
        }
    }
    if color_text.is_none() {
        color_text = rest
            .split_whitespace()
            .find(|t| parse_px(t).is_none() && *t != "inset" && parse_color(t).is_some())
            .map(str::to_string);
    }

    let rest = rest.replace("inset", " ");
    let lengths: Vec<f64> = PX_LENGTH
        .captures_iter(&format!(" {} ", rest.split_whitespace().collect::<Vec<_>>().join("  ")))
        .filter_map(|c| c[1].parse::<f64>().ok())
        .collect();
    if lengths.len() < 3 {
        debug!("Cannot decompose box-shadow: {value}");
        return None;
    }

    let (color, opacity) = match color_text.as_deref().and_then(parse_color) {
        Some(rgba) => (rgba.to_hex(), (rgba.a < 1.0).then_some(rgba.a)),
        None => ("000000".to_string(), None),
    };

    Some(Shadow {
        shadow_type,
        color,
        blur: lengths[2].max(0.0),
        offset: ShadowOffset {
            x: lengths[0],
            y: lengths[1],
        },
        opacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
        ComputedStyle::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_two_stop_positions_in_source_order() {
        let stops = parse_gradient_stops("red 0%, blue 100%");
        assert_eq!(
            stops,
            vec![
                GradientStop {
                    color: "ff0000".into(),
                    position: 0.0
                },
                GradientStop {
                    color: "0000ff".into(),
                    position: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_missing_positions_are_filled() {
        let stops = parse_gradient_stops("rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255)");
        let positions: Vec<f64> = stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_linear_gradient_with_angle_and_keyword() {
        let fill = parse_gradient("linear-gradient(90deg, rgb(255, 0, 0) 0%, rgb(0, 0, 255) 100%)")
            .unwrap();
        match fill {
            Fill::Gradient {
                gradient_type,
                angle,
                stops,
            } => {
                assert_eq!(gradient_type, GradientType::Linear);
                assert_eq!(angle, Some(90.0));
                assert_eq!(stops.len(), 2);
            }
            other => panic!("unexpected fill {other:?}"),
        }

        assert_eq!(gradient_angle("to top right"), 45.0);
        assert_eq!(gradient_angle("to left"), 270.0);
        assert_eq!(gradient_angle("-90deg"), 270.0);
        assert_eq!(gradient_angle("sideways"), 180.0);
    }

    #[test]
    fn test_radial_gradient_has_no_angle() {
        let fill = parse_gradient("radial-gradient(circle, #fff 0%, #000 100%)").unwrap();
        assert!(matches!(
            fill,
            Fill::Gradient {
                gradient_type: GradientType::Radial,
                angle: None,
                ..
            }
        ));
    }

    #[test]
    fn test_single_stop_gradient_falls_back_to_solid() {
        let fill = extract_fill(&style(&[
            ("background-image", "linear-gradient(red 0%)"),
            ("background-color", "rgb(0, 128, 0)"),
        ]));
        assert_eq!(
            fill,
            Some(Fill::Solid {
                color: "008000".into(),
                opacity: None
            })
        );
    }

    #[test]
    fn test_transparent_background_has_no_fill() {
        assert_eq!(
            extract_fill(&style(&[("background-color", "rgba(0, 0, 0, 0)")])),
            None
        );
    }

    #[test]
    fn test_url_background_is_image_fill() {
        let fill = extract_fill(&style(&[
            ("background-image", "url(\"https://example.com/bg.png\")"),
            ("background-size", "cover"),
        ]));
        assert_eq!(
            fill,
            Some(Fill::Image {
                src: "https://example.com/bg.png".into(),
                fit: Some(ImageFit::Cover)
            })
        );
    }

    #[test]
    fn test_shadow_decomposition() {
        let shadow = extract_shadow(&style(&[(
            "box-shadow",
            "rgba(0, 0, 0, 0.25) 0px 4px 12px 0px",
        )]))
        .unwrap();
        assert_eq!(shadow.shadow_type, ShadowType::Outer);
        assert_eq!(shadow.color, "000000");
        assert_eq!(shadow.opacity, Some(0.25));
        assert_eq!(shadow.offset, ShadowOffset { x: 0.0, y: 4.0 });
        assert_eq!(shadow.blur, 12.0);

        let inset = extract_shadow(&style(&[("box-shadow", "inset 2px -3px 5px #336699")])).unwrap();
        assert_eq!(inset.shadow_type, ShadowType::Inner);
        assert_eq!(inset.color, "336699");
        assert_eq!(inset.offset, ShadowOffset { x: 2.0, y: -3.0 });

        assert_eq!(extract_shadow(&style(&[("box-shadow", "none")])), None);
        assert_eq!(extract_shadow(&style(&[("box-shadow", "red 2px")])), None);
    }

    #[test]
    fn test_radius_and_shape_type() {
        let square = Rect::new(0.0, 0.0, 100.0, 100.0);
        let wide = Rect::new(0.0, 0.0, 200.0, 100.0);
        let circle = extract_border_radius(&style(&[("border-radius", "50%")]), &square);
        assert_eq!(circle, Some(50.0));
        assert_eq!(shape_type(circle, &square), ShapeType::Ellipse);
        assert_eq!(shape_type(Some(8.0), &square), ShapeType::RoundRect);
        assert_eq!(shape_type(Some(60.0), &wide), ShapeType::RoundRect);
        assert_eq!(shape_type(None, &wide), ShapeType::Rect);
        assert_eq!(
            extract_border_radius(&style(&[("border-radius", "0px")]), &square),
            None
        );
    }
}
