//! Source-pixel to backend-unit conversion.

use serde::{Deserialize, Serialize};

use crate::constants::{DPI, PT_PER_INCH};
use crate::deck::{Frame, Measure};
use crate::models::common::{Dimensions, Position};

/// How positions and sizes are expressed in the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Relative to the slide viewport.
    #[default]
    Percent,
    Inches,
}

pub fn px_to_inches(px: f64) -> f64 {
    px / DPI
}

pub fn px_to_points(px: f64) -> f64 {
    px / DPI * PT_PER_INCH
}

/// `value` as a percentage of `extent`. A non-positive extent yields 0.
pub fn px_to_percent(value: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        value / extent * 100.0
    } else {
        0.0
    }
}

/// `1 - opacity` as a whole percentage, for opacities below 1.
pub fn transparency(opacity: Option<f64>) -> Option<u32> {
    let opacity = opacity?;
    if !(0.0..1.0).contains(&opacity) {
        return None;
    }
    Some(((1.0 - opacity) * 100.0).round() as u32)
}

/// Converts source-pixel geometry into frames for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMapper {
    pub viewport: Dimensions,
    pub units: Units,
}

impl FrameMapper {
    pub fn new(viewport: Dimensions, units: Units) -> Self {
        Self { viewport, units }
    }

    /// A horizontal position or width.
    pub fn x(&self, px: f64) -> Measure {
        match self.units {
            Units::Percent => Measure::Percent(px_to_percent(px, self.viewport.width)),
            Units::Inches => Measure::Inches(px_to_inches(px)),
        }
    }

    /// A vertical position or height.
    pub fn y(&self, px: f64) -> Measure {
        match self.units {
            Units::Percent => Measure::Percent(px_to_percent(px, self.viewport.height)),
            Units::Inches => Measure::Inches(px_to_inches(px)),
        }
    }

    pub fn frame(&self, position: Position, dimensions: Dimensions) -> Frame {
        Frame {
            x: self.x(position.left),
            y: self.y(position.top),
            w: self.x(dimensions.width),
            h: self.y(dimensions.height),
        }
    }

    /// Always absolute, regardless of the configured units.
    pub fn inches_frame(position: Position, dimensions: Dimensions) -> Frame {
        Frame {
            x: Measure::Inches(px_to_inches(position.left)),
            y: Measure::Inches(px_to_inches(position.top)),
            w: Measure::Inches(px_to_inches(dimensions.width)),
            h: Measure::Inches(px_to_inches(dimensions.height)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_conversions() {
        assert_eq!(px_to_inches(96.0), 1.0);
        assert_eq!(px_to_points(16.0), 12.0);
        assert_eq!(px_to_percent(248.0, 992.0), 25.0);
        assert_eq!(px_to_percent(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_transparency() {
        assert_eq!(transparency(Some(0.25)), Some(75));
        assert_eq!(transparency(Some(1.0)), None);
        assert_eq!(transparency(None), None);
    }

    #[test]
    fn test_percent_frame() {
        let mapper = FrameMapper::new(Dimensions::new(1000.0, 500.0), Units::Percent);
        let frame = mapper.frame(Position::new(100.0, 50.0), Dimensions::new(500.0, 250.0));
        assert_eq!(frame.x, Measure::Percent(10.0));
        assert_eq!(frame.y, Measure::Percent(10.0));
        assert_eq!(frame.w, Measure::Percent(50.0));
        assert_eq!(frame.h, Measure::Percent(50.0));
    }
}
