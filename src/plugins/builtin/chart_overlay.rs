//! Recovers structured charts from the raster placeholders a charting library renders.
//!
//! The configurations are read from the raw HTML before parsing. While the slides are
//! parsed, the bounds of each chart's anchor element are recorded. Once a slide is
//! assembled, the image nearest to each anchor (by top-left corner) is replaced by a
//! chart element, and every other image inside the matched one is dropped with it.

use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::HashSet;

use super::element_base;
use crate::config::ParserConfig;
use crate::dom::snapshot::NodeRef;
use crate::errors::Result;
use crate::extractors::chart::{extract_charts_from_html, transform_plotly, ExtractedChart};
use crate::extractors::classifier::CHART_MARKER_ATTR;
use crate::extractors::position::relative_position;
use crate::models::chart::{ChartData, ChartElement, SourceLibrary};
use crate::models::common::{Bounds, Dimensions, ElementType};
use crate::models::elements::{ElementBase, ElementDto};
use crate::models::page::SlideDto;
use crate::plugins::{ParseContext, Plugin, PluginCapabilities, PluginContext};

const NAME: &str = "core:chart-plotly";

#[derive(Debug, Clone, Copy, PartialEq)]
struct AnchorBounds {
    slide_index: usize,
    bounds: Bounds,
}

#[derive(Debug, Default)]
struct ChartOverlayState {
    charts: IndexMap<String, ExtractedChart>,
    anchors: IndexMap<String, AnchorBounds>,
    /// Charts already emitted, either directly or in place of an image.
    resolved: HashSet<String>,
}

fn transform(chart: &ExtractedChart) -> Option<ChartData> {
    let result = match chart.source {
        SourceLibrary::Plotly => transform_plotly(&chart.chart_id, &chart.config),
    };
    result
        .map_err(|e| warn!("Leaving chart placeholder in place: {e}"))
        .ok()
}

/// Index of the image whose top-left corner is nearest to `anchor`. Ties keep the
/// first image scanned.
fn nearest_image(elements: &[ElementDto], anchor: &Bounds, skip: &HashSet<usize>) -> Option<usize> {
    let target = anchor.position();
    let mut best: Option<(usize, f64)> = None;
    for (index, element) in elements.iter().enumerate() {
        if element.element_type() != ElementType::Image || skip.contains(&index) {
            continue;
        }
        let distance = element.bounds().position().distance_to(&target);
        if best.map(|(_, d)| distance < d).unwrap_or(true) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ChartOverlayPlugin;

impl ChartOverlayPlugin {
    fn record_anchors(node: &NodeRef<'_>, parse: &ParseContext, state: &mut ChartOverlayState) {
        let doc = node.document();
        let Some(slide_root) = doc.node(parse.slide_root) else {
            return;
        };
        for chart_id in state.charts.keys() {
            if state.anchors.contains_key(chart_id) {
                continue;
            }
            let Some(anchor) = doc.get_element_by_id(chart_id) else {
                continue;
            };
            if !slide_root.contains(&anchor) {
                continue;
            }
            let rect = anchor.rect();
            let bounds = Bounds::from_parts(
                relative_position(&rect, &parse.slide_rect),
                Dimensions::new(rect.width, rect.height),
            );
            debug!("Chart '{chart_id}' anchored on slide {} at {bounds:?}", parse.slide_index);
            state.anchors.insert(
                chart_id.clone(),
                AnchorBounds {
                    slide_index: parse.slide_index,
                    bounds,
                },
            );
        }
    }
}

#[async_trait]
impl Plugin for ChartOverlayPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new()
            .parsing(&[ElementType::Chart, ElementType::Image])
            .with_before_parse()
            .with_on_slide()
    }

    async fn before_parse(
        &self,
        html: String,
        _config: &ParserConfig,
        ctx: &mut PluginContext,
    ) -> Result<String> {
        let charts = extract_charts_from_html(&html);
        if !charts.is_empty() {
            debug!("Found {} embedded chart configuration(s)", charts.len());
            ctx.set_state(
                NAME,
                ChartOverlayState {
                    charts,
                    ..Default::default()
                },
            );
        }
        Ok(html)
    }

    /// Records anchor bounds. A canvas marked with a chart id is turned into the chart
    /// directly; images are left to the image plugins.
    async fn on_parse(
        &self,
        node: NodeRef<'_>,
        parse: &ParseContext,
        ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        let chart = {
            let Some(state) = ctx.state_mut::<ChartOverlayState>(NAME) else {
                return Ok(None);
            };
            Self::record_anchors(&node, parse, state);

            if parse.element_type != ElementType::Chart {
                return Ok(None);
            }
            let Some(chart_id) = node.attr(CHART_MARKER_ATTR) else {
                return Ok(None);
            };
            if state.resolved.contains(chart_id) {
                return Ok(None);
            }
            let Some(data) = state.charts.get(chart_id).and_then(transform) else {
                return Ok(None);
            };
            state.resolved.insert(chart_id.to_string());
            (chart_id.to_string(), data)
        };

        let (chart_id, data) = chart;
        Ok(Some(ElementDto::Chart(ChartElement {
            base: element_base("chart", parse, ctx),
            chart_id: Some(chart_id),
            chart: data,
        })))
    }

    async fn on_slide(&self, slide: SlideDto, ctx: &mut PluginContext) -> Result<SlideDto> {
        let ids = ctx.ids();
        let Some(state) = ctx.state_mut::<ChartOverlayState>(NAME) else {
            return Ok(slide);
        };
        if state.anchors.is_empty() {
            return Ok(slide);
        }

        let mut slide = slide;
        let mut removed: HashSet<usize> = HashSet::new();
        let mut charts: IndexMap<usize, ElementDto> = IndexMap::new();
        let mut replaced: Vec<String> = Vec::new();

        for (chart_id, chart) in &state.charts {
            if state.resolved.contains(chart_id) {
                continue;
            }
            let Some(anchor) = state.anchors.get(chart_id) else {
                continue;
            };
            if anchor.slide_index != slide.order {
                continue;
            }
            let Some(matched) = nearest_image(&slide.elements, &anchor.bounds, &removed) else {
                debug!("No placeholder image for chart '{chart_id}' on slide {}", slide.order);
                continue;
            };
            let Some(data) = transform(chart) else {
                continue;
            };

            let matched_bounds = slide.elements[matched].bounds();
            for (index, element) in slide.elements.iter().enumerate() {
                if element.element_type() == ElementType::Image
                    && matched_bounds.contains(&element.bounds())
                {
                    removed.insert(index);
                }
            }
            debug!("Chart '{chart_id}' replaces image {}", slide.elements[matched].id());
            charts.insert(matched, ElementDto::Chart(ChartElement {
                base: ElementBase {
                    id: ids.next_id("chart"),
                    position: matched_bounds.position(),
                    dimensions: Dimensions::new(matched_bounds.width, matched_bounds.height),
                    ..Default::default()
                },
                chart_id: Some(chart_id.clone()),
                chart: data,
            }));
            replaced.push(chart_id.clone());
        }
        state.resolved.extend(replaced);

        slide.elements = std::mem::take(&mut slide.elements)
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match charts.swap_remove(&index) {
                Some(chart) => Some(chart),
                None => (!removed.contains(&index)).then_some(element),
            })
            .collect();
        Ok(slide)
    }
}
