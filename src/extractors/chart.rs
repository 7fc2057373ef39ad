//! Detection of embedded chart configurations and their normalization into [`ChartData`].

use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::color::sanitize_color;
use crate::errors::{ConversionError, Result};
use crate::models::chart::{
    AxisTarget, BarGrouping, ChartData, ChartFont, ChartKind, ChartMargin, ChartOptions,
    ChartSeries, Orientation, SourceLibrary,
};

static CHART_SCRIPTS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/json"][data-chart-id]"#).expect("valid selector")
});
static WITH_ID: Lazy<Selector> = Lazy::new(|| Selector::parse("[id]").expect("valid selector"));

/// Font size used for a title given as a bare string.
const STRING_TITLE_FONT_SIZE: f64 = 11.0;

/// A chart configuration found in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedChart {
    pub chart_id: String,
    /// Type of the first trace, or the script's `data-chart-type` when the trace has none.
    pub chart_type: String,
    pub config: Value,
    pub source: SourceLibrary,
}

/// Recognizes a Plotly configuration: a non-empty `data` array whose first trace is an
/// object with a `type`.
pub fn detect_source_library(config: &Value) -> Option<SourceLibrary> {
    let first = config.get("data")?.as_array()?.first()?.as_object()?;
    first.contains_key("type").then_some(SourceLibrary::Plotly)
}

/// Scans raw HTML for `<script type="application/json" data-chart-id=...>` blocks.
///
/// A block is kept when it also names a `data-chart-type`, an element with the chart id
/// exists, and its JSON is a recognized configuration. Anything else is skipped silently.
pub fn extract_charts_from_html(html: &str) -> IndexMap<String, ExtractedChart> {
    let document = Html::parse_document(html);
    let ids: HashSet<&str> = document
        .select(&WITH_ID)
        .filter_map(|e| e.value().attr("id"))
        .collect();

    let mut charts = IndexMap::new();
    for script in document.select(&CHART_SCRIPTS) {
        let Some(chart_id) = script.value().attr("data-chart-id") else {
            continue;
        };
        let Some(declared_type) = script.value().attr("data-chart-type") else {
            continue;
        };
        if !ids.contains(chart_id) {
            debug!("Chart '{chart_id}' has no anchor element, skipping");
            continue;
        }
        let text: String = script.text().collect();
        let config: Value = match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                debug!("Chart '{chart_id}' has unparseable JSON: {e}");
                continue;
            }
        };
        let Some(source) = detect_source_library(&config) else {
            debug!("Chart '{chart_id}' is not a recognized configuration");
            continue;
        };
        let chart_type = config["data"][0]["type"]
            .as_str()
            .filter(|t| !t.is_empty())
            .unwrap_or(declared_type)
            .to_string();
        charts.insert(
            chart_id.to_string(),
            ExtractedChart {
                chart_id: chart_id.to_string(),
                chart_type,
                config,
                source,
            },
        );
    }
    charts
}

/// Maps a Plotly trace type to a chart kind. Unknown types render as bars.
pub fn plotly_chart_kind(trace_type: &str, mode: Option<&str>) -> ChartKind {
    match trace_type.to_ascii_lowercase().as_str() {
        "scatter" | "scattergl" if mode == Some("markers") => ChartKind::Scatter,
        "scatter" | "scattergl" | "line" => ChartKind::Line,
        "pie" => ChartKind::Pie,
        "area" => ChartKind::Area,
        _ => ChartKind::Bar,
    }
}

/// Number conversion with JavaScript `Number()` semantics; `NaN` becomes 0.
fn to_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        _ => f64::NAN,
    };
    if n.is_nan() {
        0.0
    } else {
        n
    }
}

fn to_label(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_labels(values: &[Value]) -> Vec<String> {
    values.iter().map(to_label).collect()
}

fn parse_values(values: &[Value]) -> Vec<f64> {
    values.iter().map(to_number).collect()
}

fn is_horizontal(trace: &Map<String, Value>) -> bool {
    trace.get("orientation").and_then(Value::as_str) == Some("h")
}

fn array<'a>(trace: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    trace.get(key).and_then(Value::as_array)
}

fn trace_labels(trace: &Map<String, Value>) -> Option<Vec<String>> {
    if let Some(labels) = array(trace, "labels") {
        return Some(parse_labels(labels));
    }
    if is_horizontal(trace) {
        if let Some(y) = array(trace, "y") {
            return Some(parse_labels(y));
        }
    }
    array(trace, "x").map(|x| parse_labels(x))
}

fn trace_values(trace: &Map<String, Value>) -> Vec<f64> {
    if let Some(values) = array(trace, "values") {
        return parse_values(values);
    }
    if is_horizontal(trace) {
        if let Some(x) = array(trace, "x") {
            return parse_values(x);
        }
    }
    array(trace, "y").map(|y| parse_values(y)).unwrap_or_default()
}

fn title_text(title: &Value) -> Option<String> {
    match title {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(o) => o
            .get("text")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn title_font_size(title: &Value) -> Option<f64> {
    match title {
        Value::String(s) if !s.is_empty() => Some(STRING_TITLE_FONT_SIZE),
        Value::Object(o) => o.get("font")?.get("size")?.as_f64(),
        _ => None,
    }
}

fn axis_title(layout: &Value, axis: &str) -> Option<String> {
    layout.get(axis)?.get("title").and_then(title_text)
}

fn series_color(trace: &Map<String, Value>) -> Option<String> {
    let color = trace
        .get("marker")
        .and_then(|m| m.get("color"))
        .and_then(Value::as_str)
        .or_else(|| {
            trace
                .get("line")
                .and_then(|l| l.get("color"))
                .and_then(Value::as_str)
        })?;
    let hex = sanitize_color(color);
    (!hex.is_empty()).then_some(hex)
}

fn point_colors(trace: &Map<String, Value>) -> Option<Vec<String>> {
    let marker = trace.get("marker")?;
    let colors = marker
        .get("colors")
        .and_then(Value::as_array)
        .or_else(|| marker.get("color").and_then(Value::as_array))?;
    let hexes: Vec<String> = colors
        .iter()
        .filter_map(Value::as_str)
        .map(sanitize_color)
        .filter(|c| !c.is_empty())
        .collect();
    (!hexes.is_empty()).then_some(hexes)
}

fn axis_target(trace: &Map<String, Value>) -> AxisTarget {
    match trace.get("yaxis").and_then(Value::as_str) {
        Some("y2") => AxisTarget::Secondary,
        Some("y3") => AxisTarget::Tertiary,
        _ => AxisTarget::Primary,
    }
}

/// Normalizes a Plotly `{ data, layout }` configuration.
///
/// # Arguments
///
/// * `chart_id` - Identifier used in the error when the configuration is unusable.
/// * `config` - The parsed configuration.
///
/// # Errors
///
/// `ConversionError::InvalidChartConfig` when `data` is missing, empty, or contains a
/// trace that is not an object.
pub fn transform_plotly(chart_id: &str, config: &Value) -> Result<ChartData> {
    let invalid = |reason: &str| ConversionError::InvalidChartConfig {
        chart_id: chart_id.to_string(),
        reason: reason.to_string(),
    };

    let traces = config
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("config.data is not an array"))?;
    if traces.is_empty() {
        return Err(invalid("no traces found in config.data"));
    }
    let traces: Vec<&Map<String, Value>> = traces
        .iter()
        .enumerate()
        .map(|(i, t)| {
            t.as_object()
                .ok_or_else(|| invalid(&format!("trace {i} is not an object")))
        })
        .collect::<Result<_>>()?;

    let null = Value::Null;
    let layout = config.get("layout").unwrap_or(&null);
    let first = traces[0];
    let mode = |t: &Map<String, Value>| t.get("mode").and_then(Value::as_str).map(str::to_string);
    let trace_type = |t: &Map<String, Value>| {
        t.get("type")
            .and_then(Value::as_str)
            .unwrap_or("bar")
            .to_string()
    };
    let kind = plotly_chart_kind(&trace_type(first), mode(first).as_deref());

    let labels = traces
        .iter()
        .find_map(|t| trace_labels(t))
        .unwrap_or_default();

    let series: Vec<ChartSeries> = traces
        .iter()
        .enumerate()
        .map(|(i, trace)| ChartSeries {
            name: trace
                .get("name")
                .and_then(Value::as_str)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Series {}", i + 1)),
            labels: trace_labels(trace).unwrap_or_else(|| labels.clone()),
            values: trace_values(trace),
            chart_type: Some(plotly_chart_kind(
                &trace_type(trace),
                mode(trace).as_deref(),
            )),
            axis: axis_target(trace),
            color: series_color(trace),
            point_colors: point_colors(trace),
        })
        .collect();

    let mut options = ChartOptions {
        show_legend: layout.get("showlegend").and_then(Value::as_bool) != Some(false),
        x_axis_title: axis_title(layout, "xaxis"),
        y_axis_title: axis_title(layout, "yaxis"),
        ..Default::default()
    };
    if let Some(title) = layout.get("title") {
        options.title = title_text(title);
        options.title_font_size = title_font_size(title);
    }
    if layout.get("yaxis2").map(|a| !a.is_null()).unwrap_or(false)
        || series.iter().any(|s| s.axis == AxisTarget::Secondary)
    {
        options.has_secondary_axis = true;
        options.secondary_y_axis_title = axis_title(layout, "yaxis2");
    }

    let has_text_labels = traces
        .iter()
        .any(|t| array(t, "text").map(|a| !a.is_empty()).unwrap_or(false));
    let text_info = first.get("textinfo").and_then(Value::as_str);
    options.show_data_labels = has_text_labels || text_info.is_some();

    let text_position = first
        .get("textposition")
        .and_then(Value::as_str)
        .map(str::to_string);
    match kind {
        ChartKind::Bar => {
            options.bar_orientation = Some(if is_horizontal(first) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            });
            options.bar_grouping = match layout.get("barmode").and_then(Value::as_str) {
                Some("stack") => Some(BarGrouping::Stacked),
                Some("group") => Some(BarGrouping::Clustered),
                Some("relative") => Some(BarGrouping::PercentStacked),
                _ => None,
            };
            options.data_label_position = text_position;
        }
        ChartKind::Pie => {
            options.hole = first.get("hole").and_then(Value::as_f64);
            options.text_info = text_info.map(str::to_string);
            options.data_label_position = text_position;
        }
        _ => {}
    }

    if let Some(font) = layout.get("font").and_then(Value::as_object) {
        options.font = Some(ChartFont {
            family: font.get("family").and_then(Value::as_str).map(str::to_string),
            size: font.get("size").and_then(Value::as_f64),
            color: font
                .get("color")
                .and_then(Value::as_str)
                .map(sanitize_color)
                .filter(|c| !c.is_empty()),
        });
    }
    if let Some(margin) = layout.get("margin").and_then(Value::as_object) {
        let side = |k: &str| margin.get(k).and_then(Value::as_f64).unwrap_or(0.0);
        options.margin = Some(ChartMargin {
            top: side("t"),
            right: side("r"),
            bottom: side("b"),
            left: side("l"),
        });
    }

    Ok(ChartData {
        kind,
        source: SourceLibrary::Plotly,
        labels,
        series,
        options,
    })
}
