//! Color normalization.
//!
//! Every color leaving this module is a 6-digit lowercase hex string without `#`,
//! or the empty string meaning "no color".

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::NAMED_COLORS;
use crate::models::shape_properties::Fill;

static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgba?\(\s*([-\d.]+)(?:\s*,\s*|\s+)([-\d.]+)(?:\s*,\s*|\s+)([-\d.]+)(?:\s*[,/]\s*([\d.]+%?))?\s*\)$")
        .expect("valid rgb regex")
});

/// Components of a parsed color, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(value: &str) -> Option<u8> {
    let n: f64 = value.parse().ok()?;
    Some(n.round().clamp(0.0, 255.0) as u8)
}

fn alpha(value: &str) -> Option<f64> {
    let a = match value.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => value.parse::<f64>().ok()?,
    };
    Some(a.clamp(0.0, 1.0))
}

fn hex_digits(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expand = |c: char| -> Option<u8> {
        let d = c.to_digit(16)? as u8;
        Some(d * 16 + d)
    };
    let pair = |s: &str| u8::from_str_radix(s, 16).ok();
    let chars: Vec<char> = hex.chars().collect();
    match hex.len() {
        3 | 4 => Some(Rgba {
            r: expand(chars[0])?,
            g: expand(chars[1])?,
            b: expand(chars[2])?,
            a: if hex.len() == 4 {
                expand(chars[3])? as f64 / 255.0
            } else {
                1.0
            },
        }),
        6 | 8 => Some(Rgba {
            r: pair(&hex[0..2])?,
            g: pair(&hex[2..4])?,
            b: pair(&hex[4..6])?,
            a: if hex.len() == 8 {
                pair(&hex[6..8])? as f64 / 255.0
            } else {
                1.0
            },
        }),
        _ => None,
    }
}

/// Parses a CSS color: hex (3, 4, 6 or 8 digits, `#` optional), `rgb()`/`rgba()`
/// in comma or space syntax, or a named color.
pub fn parse_color(input: &str) -> Option<Rgba> {
    let value = input.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("transparent") {
        return None;
    }
    if let Some(caps) = RGB_FUNCTION.captures(value) {
        return Some(Rgba {
            r: channel(&caps[1])?,
            g: channel(&caps[2])?,
            b: channel(&caps[3])?,
            a: match caps.get(4) {
                Some(a) => alpha(a.as_str())?,
                None => 1.0,
            },
        });
    }
    if let Some(rgba) = hex_digits(value.strip_prefix('#').unwrap_or(value)) {
        return Some(rgba);
    }
    let lower = value.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .and_then(|(_, hex)| hex_digits(hex))
}

/// Normalizes a color to 6-digit lowercase hex without `#`.
///
/// Returns `""` for `transparent`, fully transparent colors and anything unparseable.
/// The function is idempotent: its output sanitizes to itself.
pub fn sanitize_color(input: &str) -> String {
    match parse_color(input) {
        Some(rgba) if rgba.a > 0.0 => rgba.to_hex(),
        _ => String::new(),
    }
}

/// Returns the alpha of a color when it is below 1.
pub fn parse_color_opacity(input: &str) -> Option<f64> {
    parse_color(input).map(|c| c.a).filter(|a| *a < 1.0)
}

/// Solid fill from a background color, or `None` for transparent/unparseable input.
pub fn solid_fill(color: &str) -> Option<Fill> {
    let hex = sanitize_color(color);
    if hex.is_empty() {
        return None;
    }
    Some(Fill::Solid {
        color: hex,
        opacity: parse_color_opacity(color),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(sanitize_color("#FFF"), "ffffff");
        assert_eq!(sanitize_color("abc"), "aabbcc");
        assert_eq!(sanitize_color("#1A2b3C"), "1a2b3c");
        assert_eq!(sanitize_color("336699"), "336699");
    }

    #[test]
    fn test_functional_forms() {
        assert_eq!(sanitize_color("rgb(255, 0, 0)"), "ff0000");
        assert_eq!(sanitize_color("rgba(0, 128, 255, 0.5)"), "0080ff");
        assert_eq!(sanitize_color("rgb(10 20 30 / 50%)"), "0a141e");
        assert_eq!(parse_color_opacity("rgba(0, 128, 255, 0.5)"), Some(0.5));
        assert_eq!(parse_color_opacity("rgb(0, 128, 255)"), None);
    }

    #[test]
    fn test_empty_for_transparent_and_garbage() {
        assert_eq!(sanitize_color("transparent"), "");
        assert_eq!(sanitize_color("rgba(0, 0, 0, 0)"), "");
        assert_eq!(sanitize_color(""), "");
        assert_eq!(sanitize_color("not-a-color"), "");
        assert_eq!(sanitize_color("#12345"), "");
        assert_eq!(sanitize_color("linear-gradient(red, blue)"), "");
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(sanitize_color("Red"), "ff0000");
        assert_eq!(sanitize_color("steelblue"), "4682b4");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [
            "#FFF",
            "rgb(255, 0, 0)",
            "rgba(1, 2, 3, 0.4)",
            "transparent",
            "garbage",
            "navy",
            "",
            "  #0a0B0c ",
            "rgb(300, -5, 12.6)",
        ] {
            let once = sanitize_color(input);
            assert_eq!(sanitize_color(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_solid_fill_keeps_partial_opacity() {
        assert_eq!(
            solid_fill("rgba(255, 255, 255, 0.25)"),
            Some(Fill::Solid {
                color: "ffffff".into(),
                opacity: Some(0.25)
            })
        );
        assert_eq!(solid_fill("rgba(0, 0, 0, 0)"), None);
    }
}
