use async_trait::async_trait;

use super::element_base;
use crate::dom::snapshot::NodeRef;
use crate::errors::Result;
use crate::extractors::shape::extract_fill;
use crate::extractors::stroke::extract_border;
use crate::extractors::text::extract_text_content;
use crate::extractors::typography::{extract_padding, extract_typography};
use crate::models::common::ElementType;
use crate::models::elements::ElementDto;
use crate::models::table::{TableCell, TableElement};
use crate::plugins::{ParseContext, Plugin, PluginCapabilities, PluginContext};

/// `table` elements as a row-major grid of cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct TablePlugin;

fn span(cell: &NodeRef<'_>, attr: &str) -> u32 {
    cell.attr(attr)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

fn cells<'a>(row: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    row.element_children()
        .filter(|c| matches!(c.tag_name(), "th" | "td"))
}

/// A cell without its own fill or border takes the row's.
fn parse_cell(cell: NodeRef<'_>, row: &NodeRef<'_>) -> TableCell {
    let style = cell.style();
    let padding = extract_padding(style);
    TableCell {
        text: extract_text_content(cell),
        typography: extract_typography(style),
        fill: extract_fill(style).or_else(|| extract_fill(row.style())),
        border: extract_border(style).or_else(|| extract_border(row.style())),
        colspan: span(&cell, "colspan"),
        rowspan: span(&cell, "rowspan"),
        padding: (!padding.is_zero()).then_some(padding),
        is_header: cell.tag_name() == "th",
    }
}

#[async_trait]
impl Plugin for TablePlugin {
    fn name(&self) -> &str {
        "core:table"
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::new().parsing(&[ElementType::Table])
    }

    async fn on_parse(
        &self,
        node: NodeRef<'_>,
        parse: &ParseContext,
        ctx: &mut PluginContext,
    ) -> Result<Option<ElementDto>> {
        let table_rows: Vec<NodeRef<'_>> = node
            .descendants()
            .into_iter()
            .filter(|n| n.tag_name() == "tr")
            .collect();

        let rows: Vec<Vec<TableCell>> = table_rows
            .iter()
            .map(|row| cells(row).map(|cell| parse_cell(cell, row)).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();
        if rows.is_empty() {
            return Ok(None);
        }

        let header_row = node
            .descendants()
            .iter()
            .any(|n| matches!(n.tag_name(), "thead" | "th"));
        let column_widths = table_rows
            .first()
            .map(|row| cells(row).map(|c| c.rect().width).collect())
            .unwrap_or_default();

        Ok(Some(ElementDto::Table(TableElement {
            base: element_base("table", parse, ctx),
            rows,
            header_row,
            column_widths,
        })))
    }
}
