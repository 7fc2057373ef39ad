// src/models/chart.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::ElementBase;

/// Chart kinds the serializer knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
    Scatter,
}

/// Which value axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisTarget {
    #[default]
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BarGrouping {
    Stacked,
    Clustered,
    PercentStacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// The charting library a configuration was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLibrary {
    Plotly,
}

/// One data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,

    /// Per-series kind, set when a trace differs from the chart's overall kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartKind>,

    #[serde(default)]
    pub axis: AxisTarget,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Per-point colors (pie slices, individually colored bars).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFont {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Presentation options of a chart, normalized from the library's layout object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<f64>,

    pub show_legend: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_y_axis_title: Option<String>,

    pub show_data_labels: bool,

    /// Library-specific label placement ("inside", "outside", "auto", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_label_position: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_orientation: Option<Orientation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_grouping: Option<BarGrouping>,

    #[serde(default)]
    pub has_secondary_axis: bool,

    /// Pie hole as a fraction of the radius (`0.0..1.0`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_info: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<ChartFont>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<ChartMargin>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: None,
            title_font_size: None,
            show_legend: true,
            x_axis_title: None,
            y_axis_title: None,
            secondary_y_axis_title: None,
            show_data_labels: false,
            data_label_position: None,
            bar_orientation: None,
            bar_grouping: None,
            has_secondary_axis: false,
            hole: None,
            text_info: None,
            font: None,
            margin: None,
        }
    }
}

/// Normalized chart data: the library-independent form a chart element carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub kind: ChartKind,
    pub source: SourceLibrary,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartElement {
    #[serde(flatten)]
    pub base: ElementBase,

    /// Identifier of the chart configuration this element was recovered from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_id: Option<String>,

    pub chart: ChartData,
}
