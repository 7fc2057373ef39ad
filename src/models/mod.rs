//! Data model of the conversion: the normalized, backend-independent description
//! of slides and their elements.

pub mod bullet;
pub mod chart;
pub mod common;
pub mod elements;
pub mod image;
pub mod line;
pub mod page;
pub mod presentation;
pub mod properties;
pub mod shape;
pub mod shape_properties;
pub mod table;
pub mod text;
pub mod text_element;

pub use bullet::{Bullet, BulletKind};
pub use chart::{
    AxisTarget, BarGrouping, ChartData, ChartElement, ChartFont, ChartKind, ChartMargin,
    ChartOptions, ChartSeries, Orientation, SourceLibrary,
};
pub use common::{Bounds, Dimensions, ElementType, Padding, Position};
pub use elements::{ElementBase, ElementDto};
pub use image::ImageElement;
pub use line::LineElement;
pub use page::{SlideBackground, SlideDto};
pub use presentation::{PresentationDto, PresentationMetadata};
pub use properties::{FontStyle, TextAlign, Typography, VerticalAlign};
pub use shape::ShapeElement;
pub use shape_properties::{
    Border, Fill, GradientStop, GradientType, ImageFit, Shadow, ShadowOffset, ShadowType,
    ShapeType, Stroke, StrokeStyle,
};
pub use table::{TableCell, TableElement};
pub use text::{FlatRun, RunId, TextRun, TextRuns};
pub use text_element::{TextElement, TextType};
