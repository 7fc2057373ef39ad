//! Pure functions turning computed style and layout into element attributes.

pub mod chart;
pub mod classifier;
pub mod color;
pub mod icon;
pub mod list;
pub mod position;
pub mod shape;
pub mod stroke;
pub mod text;
pub mod typography;

pub use chart::{extract_charts_from_html, transform_plotly, ExtractedChart};
pub use classifier::classify;
pub use color::sanitize_color;
pub use icon::{IconCache, IconSource, IconSvg, IconVariant};
