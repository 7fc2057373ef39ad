//! Slide-relative geometry.

use crate::dom::snapshot::Rect;
use crate::models::common::{Dimensions, Position};

/// Horizontal space taken by a leading icon glyph inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IconOffset {
    pub width: f64,
    pub margin_right: f64,
}

impl IconOffset {
    pub fn total(&self) -> f64 {
        self.width + self.margin_right
    }
}

/// Position of `rect` relative to the top-left corner of `container`.
pub fn relative_position(rect: &Rect, container: &Rect) -> Position {
    Position::new(rect.x - container.x, rect.y - container.y)
}

/// Dimensions of `rect` with its width scaled by `buffer`. Height is never scaled.
pub fn dimensions(rect: &Rect, buffer: f64) -> Dimensions {
    Dimensions::new(rect.width * buffer, rect.height)
}

/// Width multiplier for a text box, compensating for font-metric differences between
/// the browser and the presentation renderer. Larger text needs more slack.
pub fn text_width_buffer(font_size: f64) -> f64 {
    if font_size < 20.0 {
        1.03
    } else if font_size < 40.0 {
        1.04
    } else {
        1.06
    }
}

/// Position and dimensions of a text box, widened by `buffer`. A leading icon's width and
/// right margin are cut from the left of the box, since the icon is emitted as its own
/// element.
pub fn text_box(
    rect: &Rect,
    container: &Rect,
    buffer: f64,
    icon: Option<IconOffset>,
) -> (Position, Dimensions) {
    let mut position = relative_position(rect, container);
    let offset = icon
        .map(|i| i.total())
        .unwrap_or(0.0)
        .max(0.0)
        .min(rect.width.max(0.0));
    position.left += offset;
    let trimmed = Rect::new(rect.x + offset, rect.y, rect.width - offset, rect.height);
    (position, dimensions(&trimmed, buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_position() {
        let slide = Rect::new(100.0, 50.0, 992.0, 558.0);
        let el = Rect::new(140.0, 70.0, 200.0, 40.0);
        assert_eq!(relative_position(&el, &slide), Position::new(40.0, 20.0));
    }

    #[test]
    fn test_buffer_steps() {
        assert_eq!(text_width_buffer(12.0), 1.03);
        assert_eq!(text_width_buffer(20.0), 1.04);
        assert_eq!(text_width_buffer(39.9), 1.04);
        assert_eq!(text_width_buffer(48.0), 1.06);
    }

    #[test]
    fn test_text_box_excludes_icon() {
        let slide = Rect::new(0.0, 0.0, 992.0, 558.0);
        let el = Rect::new(10.0, 10.0, 200.0, 20.0);
        let (pos, dims) = text_box(
            &el,
            &slide,
            text_width_buffer(16.0),
            Some(IconOffset {
                width: 16.0,
                margin_right: 8.0,
            }),
        );
        assert_eq!(pos.left, 34.0);
        assert_eq!(pos.top, 10.0);
        assert!((dims.width - 176.0 * 1.03).abs() < 1e-9);
        assert_eq!(dims.height, 20.0);
    }

    #[test]
    fn test_text_box_tolerates_degenerate_width() {
        let slide = Rect::new(0.0, 0.0, 992.0, 558.0);
        let icon = IconOffset {
            width: 16.0,
            margin_right: 4.0,
        };
        let (pos, _) = text_box(&Rect::new(10.0, 10.0, -5.0, 20.0), &slide, 1.0, Some(icon));
        assert_eq!(pos.left, 10.0);
        let (pos, _) = text_box(&Rect::new(10.0, 10.0, f64::NAN, 20.0), &slide, 1.0, Some(icon));
        assert_eq!(pos.left, 10.0);
    }
}
