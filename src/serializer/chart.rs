//! Chart elements: single charts and dual-axis combo charts.

use crate::constants::{CHART_FONT_SIZE, CHART_GRID_COLOR};
use crate::deck::{
    CatAxisSpec, ChartBody, ChartObject, ChartOptionsSpec, ChartSeriesSpec, ComboPart,
    ComboPartOptions, GridLineSpec, ValAxisSpec,
};
use crate::models::chart::{
    AxisTarget, BarGrouping, ChartData, ChartElement, ChartKind, ChartSeries, Orientation,
};
use crate::serializer::units::FrameMapper;

pub fn chart_type_name(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "bar",
        ChartKind::Line => "line",
        ChartKind::Pie => "pie",
        ChartKind::Area => "area",
        ChartKind::Scatter => "scatter",
    }
}

/// Chart type of the whole chart; a pie with a hole is a doughnut.
fn chart_type_key(chart: &ChartData) -> &'static str {
    match (chart.kind, chart.options.hole) {
        (ChartKind::Pie, Some(hole)) if hole > 0.0 => "doughnut",
        (kind, _) => chart_type_name(kind),
    }
}

fn grouping_name(grouping: BarGrouping) -> &'static str {
    match grouping {
        BarGrouping::Stacked => "stacked",
        BarGrouping::Clustered => "clustered",
        BarGrouping::PercentStacked => "percentStacked",
    }
}

fn decimals(value: f64) -> usize {
    let formatted = value.to_string();
    formatted.split('.').nth(1).map_or(0, str::len)
}

/// Number format for data labels: as many decimals as the most precise
/// non-integer value across all series, at most two.
pub fn data_label_format(series: &[ChartSeries]) -> String {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter())
        .filter(|v| v.is_finite() && v.fract() != 0.0)
        .map(|v| decimals(*v).min(2))
        .max()
        .unwrap_or(0);
    match max {
        0 => "#,##0".to_string(),
        1 => "#,##0.0".to_string(),
        _ => "#,##0.00".to_string(),
    }
}

fn upper(color: &str) -> Option<String> {
    (!color.is_empty()).then(|| color.to_uppercase())
}

fn series_spec(series: &ChartSeries, labels: &[String]) -> ChartSeriesSpec {
    ChartSeriesSpec {
        name: series.name.clone(),
        labels: if labels.is_empty() {
            series.labels.clone()
        } else {
            labels.to_vec()
        },
        values: series.values.clone(),
        color: series.color.as_deref().and_then(upper),
    }
}

/// Per-point colors of the first series that has them, otherwise one color per series.
fn chart_colors(series: &[ChartSeries]) -> Vec<String> {
    let colors: Vec<&str> = match series.iter().find_map(|s| s.point_colors.as_ref()) {
        Some(points) if !points.is_empty() => points.iter().map(String::as_str).collect(),
        _ => series.iter().filter_map(|s| s.color.as_deref()).collect(),
    };
    colors.into_iter().filter_map(upper).collect()
}

fn chart_options(chart: &ChartData) -> ChartOptionsSpec {
    let opts = &chart.options;
    let mut options = ChartOptionsSpec {
        title: opts.title.clone(),
        show_title: opts.title.is_some(),
        title_font_size: opts.title_font_size.unwrap_or(CHART_FONT_SIZE),
        show_legend: opts.show_legend,
        legend_pos: "t".to_string(),
        legend_font_size: CHART_FONT_SIZE,
        show_label: opts.show_data_labels,
        data_label_font_size: CHART_FONT_SIZE,
        chart_colors: chart_colors(&chart.series),
        cat_axis_label_font_size: Some(CHART_FONT_SIZE),
        val_axis_label_font_size: Some(CHART_FONT_SIZE),
        cat_grid_line: Some(GridLineSpec::none()),
        val_grid_line: Some(GridLineSpec::solid(1.0, CHART_GRID_COLOR)),
        ..Default::default()
    };

    if opts.show_data_labels {
        match chart.kind {
            ChartKind::Bar => {
                options.show_value = true;
                options.data_label_format_code = Some(data_label_format(&chart.series));
            }
            ChartKind::Pie => options.show_percent = true,
            _ => {}
        }
    }
    if chart.kind == ChartKind::Pie {
        options.data_label_position = Some("outEnd".to_string());
    }

    if let Some(title) = &opts.x_axis_title {
        options.cat_axis_title = Some(title.clone());
        options.show_cat_axis_title = true;
        options.cat_axis_title_font_size = Some(CHART_FONT_SIZE);
    }
    if let Some(title) = &opts.y_axis_title {
        options.val_axis_title = Some(title.clone());
        options.show_val_axis_title = true;
        options.val_axis_title_font_size = Some(CHART_FONT_SIZE);
    }

    if let Some(hole) = opts.hole.filter(|h| *h > 0.0) {
        options.hole_size = Some((hole * 100.0).round() as u32);
    }

    options.bar_dir = match opts.bar_orientation {
        Some(Orientation::Horizontal) => Some("bar".to_string()),
        Some(Orientation::Vertical) => Some("col".to_string()),
        None if chart.kind == ChartKind::Bar => Some("col".to_string()),
        None => None,
    };
    options.bar_grouping = opts.bar_grouping.map(|g| grouping_name(g).to_string());
    options
}

/// Series partitioned by chart type, in first-seen order.
type TypeGroups = Vec<(ChartKind, Vec<ChartSeriesSpec>)>;

fn push_grouped(groups: &mut TypeGroups, kind: ChartKind, spec: ChartSeriesSpec) {
    match groups.iter_mut().find(|(k, _)| *k == kind) {
        Some((_, specs)) => specs.push(spec),
        None => groups.push((kind, vec![spec])),
    }
}

/// Splits series by value axis, then by chart type. `None` when no series uses the
/// secondary axis.
fn combo_parts(chart: &ChartData) -> Option<Vec<ComboPart>> {
    let mut primary = TypeGroups::new();
    let mut secondary = TypeGroups::new();
    for series in &chart.series {
        let kind = series.chart_type.unwrap_or(chart.kind);
        let spec = series_spec(series, &chart.labels);
        match series.axis {
            AxisTarget::Secondary => push_grouped(&mut secondary, kind, spec),
            AxisTarget::Primary | AxisTarget::Tertiary => push_grouped(&mut primary, kind, spec),
        }
    }
    if secondary.is_empty() {
        return None;
    }

    let mut parts: Vec<ComboPart> = primary
        .into_iter()
        .map(|(kind, data)| ComboPart {
            chart_type: chart_type_name(kind).to_string(),
            data,
            options: ComboPartOptions::default(),
        })
        .collect();
    parts.extend(secondary.into_iter().map(|(kind, data)| {
        let labelled = matches!(kind, ChartKind::Line | ChartKind::Area);
        ComboPart {
            chart_type: chart_type_name(kind).to_string(),
            data,
            options: ComboPartOptions {
                secondary_val_axis: true,
                secondary_cat_axis: true,
                show_value: labelled,
                data_label_position: labelled.then(|| "t".to_string()),
            },
        }
    }));
    Some(parts)
}

/// Chart-wide options of a combo chart, with axis settings mirrored onto both axes.
fn combo_options(chart: &ChartData, single: &ChartOptionsSpec) -> ChartOptionsSpec {
    let opts = &chart.options;
    let cat_title = opts.x_axis_title.clone().unwrap_or_default();
    let show_cat_title = !cat_title.is_empty();
    ChartOptionsSpec {
        title: single.title.clone(),
        show_title: single.show_title,
        title_font_size: single.title_font_size,
        show_legend: single.show_legend,
        legend_pos: "t".to_string(),
        legend_font_size: CHART_FONT_SIZE,
        data_label_font_size: CHART_FONT_SIZE,
        chart_colors: single.chart_colors.clone(),
        data_label_format_code: single.data_label_format_code.clone(),
        val_axes: vec![
            ValAxisSpec {
                val_axis_title: opts.y_axis_title.clone().unwrap_or_default(),
                show_val_axis_title: opts.y_axis_title.is_some(),
                val_axis_title_font_size: CHART_FONT_SIZE,
                val_axis_label_font_size: CHART_FONT_SIZE,
                val_grid_line: GridLineSpec::solid(1.0, CHART_GRID_COLOR),
            },
            ValAxisSpec {
                val_axis_title: opts.secondary_y_axis_title.clone().unwrap_or_default(),
                show_val_axis_title: false,
                val_axis_title_font_size: CHART_FONT_SIZE,
                val_axis_label_font_size: CHART_FONT_SIZE,
                val_grid_line: GridLineSpec::none(),
            },
        ],
        cat_axes: vec![
            CatAxisSpec {
                cat_axis_title: Some(cat_title),
                show_cat_axis_title: show_cat_title,
                cat_axis_title_font_size: Some(CHART_FONT_SIZE),
                cat_axis_label_font_size: CHART_FONT_SIZE,
                cat_axis_hidden: false,
                cat_grid_line: GridLineSpec::none(),
            },
            CatAxisSpec {
                cat_axis_title: None,
                show_cat_axis_title: false,
                cat_axis_title_font_size: None,
                cat_axis_label_font_size: CHART_FONT_SIZE,
                cat_axis_hidden: true,
                cat_grid_line: GridLineSpec::none(),
            },
        ],
        ..Default::default()
    }
}

/// Charts are always placed in absolute units.
pub fn serialize_chart(element: &ChartElement) -> ChartObject {
    let chart = &element.chart;
    let frame = FrameMapper::inches_frame(element.base.position, element.base.dimensions);
    let options = chart_options(chart);

    if chart.options.has_secondary_axis {
        if let Some(parts) = combo_parts(chart) {
            return ChartObject {
                frame,
                options: combo_options(chart, &options),
                body: ChartBody::Combo { parts },
            };
        }
    }

    ChartObject {
        frame,
        body: ChartBody::Single {
            chart_type: chart_type_key(chart).to_string(),
            data: chart
                .series
                .iter()
                .map(|s| series_spec(s, &chart.labels))
                .collect(),
        },
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chart::{ChartOptions, SourceLibrary};
    use crate::models::common::{Dimensions, Position};
    use crate::models::elements::ElementBase;

    fn series(name: &str, values: Vec<f64>, kind: Option<ChartKind>, axis: AxisTarget) -> ChartSeries {
        ChartSeries {
            name: name.into(),
            labels: vec![],
            values,
            chart_type: kind,
            axis,
            color: Some("336699".into()),
            point_colors: None,
        }
    }

    fn element(kind: ChartKind, series: Vec<ChartSeries>, options: ChartOptions) -> ChartElement {
        ChartElement {
            base: ElementBase {
                id: "chart-1".into(),
                position: Position::new(96.0, 96.0),
                dimensions: Dimensions::new(480.0, 288.0),
                ..Default::default()
            },
            chart_id: Some("revenue".into()),
            chart: ChartData {
                kind,
                source: SourceLibrary::Plotly,
                labels: vec!["Q1".into(), "Q2".into()],
                series,
                options,
            },
        }
    }

    #[test]
    fn test_format_code_scans_every_series() {
        let all = vec![
            series("a", vec![1.0, 2.0], None, AxisTarget::Primary),
            series("b", vec![3.5, 4.0], None, AxisTarget::Primary),
        ];
        assert_eq!(data_label_format(&all), "#,##0.0");
        let precise = vec![series("c", vec![1.234], None, AxisTarget::Primary)];
        assert_eq!(data_label_format(&precise), "#,##0.00");
        let whole = vec![series("d", vec![1.0, 20.0], None, AxisTarget::Primary)];
        assert_eq!(data_label_format(&whole), "#,##0");
    }

    #[test]
    fn test_single_bar_chart() {
        let object = serialize_chart(&element(
            ChartKind::Bar,
            vec![series("2024", vec![10.0, 12.5], None, AxisTarget::Primary)],
            ChartOptions {
                title: Some("Revenue".into()),
                show_data_labels: true,
                bar_grouping: Some(BarGrouping::Stacked),
                ..Default::default()
            },
        ));
        let ChartBody::Single { chart_type, data } = &object.body else {
            panic!("expected a single chart");
        };
        assert_eq!(chart_type, "bar");
        assert_eq!(data[0].labels, vec!["Q1", "Q2"]);
        assert_eq!(data[0].color.as_deref(), Some("336699"));
        assert!(object.options.show_title);
        assert!(object.options.show_value);
        assert_eq!(object.options.data_label_format_code.as_deref(), Some("#,##0.0"));
        assert_eq!(object.options.bar_dir.as_deref(), Some("col"));
        assert_eq!(object.options.bar_grouping.as_deref(), Some("stacked"));
        assert_eq!(object.options.chart_colors, vec!["336699"]);
        assert_eq!(object.frame.x.value(), 1.0);
        assert_eq!(object.frame.w.value(), 5.0);
    }

    #[test]
    fn test_pie_with_hole_is_doughnut() {
        let object = serialize_chart(&element(
            ChartKind::Pie,
            vec![series("share", vec![1.0, 3.0], None, AxisTarget::Primary)],
            ChartOptions {
                hole: Some(0.4),
                show_data_labels: true,
                ..Default::default()
            },
        ));
        let ChartBody::Single { chart_type, .. } = &object.body else {
            panic!("expected a single chart");
        };
        assert_eq!(chart_type, "doughnut");
        assert_eq!(object.options.hole_size, Some(40));
        assert!(object.options.show_percent);
        assert_eq!(object.options.data_label_position.as_deref(), Some("outEnd"));
        assert_eq!(object.options.bar_dir, None);
    }

    #[test]
    fn test_secondary_axis_builds_combo() {
        let object = serialize_chart(&element(
            ChartKind::Bar,
            vec![
                series("sales", vec![1.0, 2.0], None, AxisTarget::Primary),
                series("margin", vec![0.1, 0.2], Some(ChartKind::Line), AxisTarget::Secondary),
                series("units", vec![5.0, 6.0], None, AxisTarget::Primary),
            ],
            ChartOptions {
                has_secondary_axis: true,
                y_axis_title: Some("USD".into()),
                secondary_y_axis_title: Some("%".into()),
                ..Default::default()
            },
        ));
        let ChartBody::Combo { parts } = &object.body else {
            panic!("expected a combo chart");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chart_type, "bar");
        assert_eq!(parts[0].data.len(), 2);
        assert!(!parts[0].options.secondary_val_axis);
        assert_eq!(parts[1].chart_type, "line");
        assert!(parts[1].options.secondary_val_axis && parts[1].options.secondary_cat_axis);
        assert!(parts[1].options.show_value);
        assert_eq!(parts[1].options.data_label_position.as_deref(), Some("t"));

        assert_eq!(object.options.val_axes.len(), 2);
        assert!(object.options.val_axes[0].show_val_axis_title);
        assert_eq!(object.options.val_axes[1].val_axis_title, "%");
        assert!(object.options.cat_axes[1].cat_axis_hidden);
    }

    #[test]
    fn test_secondary_flag_without_secondary_series_stays_single() {
        let object = serialize_chart(&element(
            ChartKind::Line,
            vec![series("a", vec![1.0], None, AxisTarget::Primary)],
            ChartOptions {
                has_secondary_axis: true,
                ..Default::default()
            },
        ));
        assert!(matches!(object.body, ChartBody::Single { .. }));
    }
}
