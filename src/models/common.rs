// src/models/common.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic kind of a visual element extracted from the rendered page.
/// A single DOM node may classify to several of these at once (e.g. a styled `<li>`
/// is both a `Shape` and a `Text`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Shape,
    Chart,
    Table,
    Line,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Shape => "shape",
            ElementType::Chart => "chart",
            ElementType::Table => "table",
            ElementType::Line => "line",
        };
        f.write_str(name)
    }
}

/// A slide-relative position in source pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Euclidean distance between two top-left corners.
    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.left - other.left).powi(2) + (self.top - other.top).powi(2)).sqrt()
    }
}

/// A width and height in source pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A position together with its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn from_parts(position: Position, dimensions: Dimensions) -> Self {
        Self {
            left: position.left,
            top: position.top,
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn position(&self) -> Position {
        Position::new(self.left, self.top)
    }

    /// Returns true when `other` lies entirely within these bounds (edges inclusive).
    pub fn contains(&self, other: &Bounds) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Inner padding of a box, in source pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}
