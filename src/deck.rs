//! The generated slide-deck document: the ordered add-operations handed to a
//! document-generation backend, and the backend contract itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::Result;

/// A coordinate or extent, either absolute or relative to the slide size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Inches(f64),
    /// Percentage of the slide width (x, w) or height (y, h).
    Percent(f64),
}

impl Measure {
    pub fn value(&self) -> f64 {
        match self {
            Measure::Inches(v) | Measure::Percent(v) => *v,
        }
    }

    /// A measure of the same unit holding `value`.
    pub fn with_value(&self, value: f64) -> Measure {
        match self {
            Measure::Inches(_) => Measure::Inches(value),
            Measure::Percent(_) => Measure::Percent(value),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Inches(v) => write!(f, "{v}"),
            Measure::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Measure::Inches(v) => serializer.serialize_f64(*v),
            Measure::Percent(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Measure::Inches(v)),
            Raw::Text(s) => s
                .trim()
                .strip_suffix('%')
                .and_then(|n| n.trim().parse::<f64>().ok())
                .map(Measure::Percent)
                .ok_or_else(|| de::Error::custom(format!("invalid measure '{s}'"))),
        }
    }
}

/// Placement of an object on its slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Measure,
    pub y: Measure,
    pub w: Measure,
    pub h: Measure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckLayout {
    pub name: String,
    /// Inches.
    pub width: f64,
    /// Inches.
    pub height: f64,
}

/// Document properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDocument {
    pub layout: DeckLayout,
    pub properties: DeckProperties,
    pub slides: Vec<DeckSlide>,
}

impl DeckDocument {
    pub fn object_count(&self) -> usize {
        self.slides.iter().map(|s| s.objects.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSlide {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<FillSpec>,
    pub objects: Vec<SlideObject>,
}

/// One add-operation on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlideObject {
    Text(TextObject),
    Shape(ShapeObject),
    Image(ImageObject),
    Table(TableObject),
    Line(LineObject),
    Chart(ChartObject),
}

/// Solid fill (or a picture, for slide backgrounds). Transparency is 0-100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
}

/// Outline of a shape or line. Width in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSpec {
    pub color: String,
    pub width: f64,
    pub dash_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
}

/// Character formatting shared by text runs, text boxes and table cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,
    /// Points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strike: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRunSpec {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
    /// A paragraph break follows this run.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub break_line: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletSpec {
    /// `bullet` or `number`.
    #[serde(rename = "type")]
    pub bullet_type: String,
    /// Points.
    pub indent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextObject {
    #[serde(flatten)]
    pub frame: Frame,
    pub runs: Vec<TextRunSpec>,
    #[serde(flatten)]
    pub style: TextStyle,
    pub align: String,
    pub valign: String,
    pub line_spacing_multiple: f64,
    /// Points: left, right, top, bottom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<BulletSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowSpec {
    #[serde(rename = "type")]
    pub shadow_type: String,
    pub color: String,
    /// Points.
    pub blur: f64,
    /// Points.
    pub offset: f64,
    /// Degrees in `[0, 360)`.
    pub angle: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeObject {
    pub shape_type: String,
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineSpec>,
    /// Corner radius as a fraction of the shorter side, in `(0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineObject {
    #[serde(flatten)]
    pub frame: Frame,
    pub line: LineSpec,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flip_h: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flip_v: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSizing {
    /// `contain`, `cover` or `crop`.
    #[serde(rename = "type")]
    pub sizing_type: String,
    /// Inches.
    pub w: f64,
    /// Inches.
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageObject {
    #[serde(flatten)]
    pub frame: Frame,
    /// Inline `data:` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// URL or file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizing: Option<ImageSizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u32>,
}

/// One side of a table cell border. `border_type` is `solid`, `dash` or `none`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBorderSpec {
    #[serde(rename = "type")]
    pub border_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellSpec {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillSpec>,
    /// Top, right, bottom, left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<[CellBorderSpec; 4]>,
    /// Points: left, right, top, bottom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<[f64; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableObject {
    #[serde(flatten)]
    pub frame: Frame,
    pub rows: Vec<Vec<TableCellSpec>>,
    /// Column widths in inches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub col_w: Vec<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub first_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeriesSpec {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLineSpec {
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl GridLineSpec {
    pub fn none() -> Self {
        Self {
            style: "none".to_string(),
            size: None,
            color: None,
        }
    }

    pub fn solid(size: f64, color: &str) -> Self {
        Self {
            style: "solid".to_string(),
            size: Some(size),
            color: Some(color.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValAxisSpec {
    pub val_axis_title: String,
    pub show_val_axis_title: bool,
    pub val_axis_title_font_size: f64,
    pub val_axis_label_font_size: f64,
    pub val_grid_line: GridLineSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatAxisSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_axis_title: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_cat_axis_title: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_axis_title_font_size: Option<f64>,
    pub cat_axis_label_font_size: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cat_axis_hidden: bool,
    pub cat_grid_line: GridLineSpec,
}

/// Chart-wide options. Font sizes are in points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptionsSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub show_title: bool,
    pub title_font_size: f64,
    pub show_legend: bool,
    pub legend_pos: String,
    pub legend_font_size: f64,
    pub show_label: bool,
    pub data_label_font_size: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_value: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_percent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_label_format_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_label_position: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chart_colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_axis_title: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_cat_axis_title: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_axis_title_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub val_axis_title: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_val_axis_title: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub val_axis_title_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_axis_label_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub val_axis_label_font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_grid_line: Option<GridLineSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub val_grid_line: Option<GridLineSpec>,
    /// Percent of the radius, for doughnuts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_size: Option<u32>,
    /// `bar` (horizontal) or `col` (vertical).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_grouping: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub val_axes: Vec<ValAxisSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cat_axes: Vec<CatAxisSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboPartOptions {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secondary_val_axis: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secondary_cat_axis: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_label_position: Option<String>,
}

/// One chart type of a combo chart, with the series drawn in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboPart {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: Vec<ChartSeriesSpec>,
    pub options: ComboPartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "layout")]
pub enum ChartBody {
    Single {
        #[serde(rename = "type")]
        chart_type: String,
        data: Vec<ChartSeriesSpec>,
    },
    Combo { parts: Vec<ComboPart> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartObject {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(flatten)]
    pub body: ChartBody,
    pub options: ChartOptionsSpec,
}

/// Writes a generated document to its final byte representation.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn write(&self, document: &DeckDocument) -> Result<Vec<u8>>;
}

/// Writes the document as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonBackend {
    pretty: bool,
}

impl JsonBackend {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

#[async_trait]
impl DocumentBackend for JsonBackend {
    async fn write(&self, document: &DeckDocument) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        Ok(bytes)
    }
}
