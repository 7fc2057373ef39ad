use crate::deck::{CellBorderSpec, TableCellSpec, TableObject};
use crate::models::shape_properties::{Border, Stroke, StrokeStyle};
use crate::models::table::{TableCell, TableElement};
use crate::serializer::shape::fill_spec;
use crate::serializer::text::{align_name, margin, text_style, valign_name};
use crate::serializer::units::{px_to_inches, px_to_points, FrameMapper};

fn border_side(stroke: Option<&Stroke>) -> CellBorderSpec {
    match stroke {
        Some(stroke) => CellBorderSpec {
            border_type: match stroke.style {
                StrokeStyle::Solid => "solid".to_string(),
                StrokeStyle::Dashed | StrokeStyle::Dotted => "dash".to_string(),
            },
            color: Some(stroke.color.to_uppercase()),
            pt: Some(px_to_points(stroke.width)),
        },
        None => CellBorderSpec {
            border_type: "none".to_string(),
            color: None,
            pt: None,
        },
    }
}

fn cell_borders(border: &Border) -> [CellBorderSpec; 4] {
    border.sides().map(border_side)
}

fn serialize_cell(cell: &TableCell) -> TableCellSpec {
    TableCellSpec {
        text: cell.text.clone(),
        style: text_style(&cell.typography),
        colspan: (cell.colspan > 1).then_some(cell.colspan),
        rowspan: (cell.rowspan > 1).then_some(cell.rowspan),
        align: cell.typography.text_align.map(|a| align_name(a).to_string()),
        valign: cell
            .typography
            .vertical_align
            .map(|a| valign_name(a).to_string()),
        fill: cell.fill.as_ref().and_then(fill_spec),
        border: cell.border.as_ref().map(cell_borders),
        margin: cell.padding.as_ref().filter(|p| !p.is_zero()).map(margin),
    }
}

pub fn serialize_table(element: &TableElement, mapper: &FrameMapper) -> TableObject {
    TableObject {
        frame: mapper.frame(element.base.position, element.base.dimensions),
        rows: element
            .rows
            .iter()
            .map(|row| row.iter().map(serialize_cell).collect())
            .collect(),
        col_w: element.column_widths.iter().map(|w| px_to_inches(*w)).collect(),
        first_row_header: element.header_row,
    }
}
