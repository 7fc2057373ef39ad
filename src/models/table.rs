// src/models/table.rs

use serde::{Deserialize, Serialize};

use crate::models::common::Padding;
use crate::models::elements::ElementBase;
use crate::models::properties::Typography;
use crate::models::shape_properties::{Border, Fill};

fn one() -> u32 {
    1
}

/// A single cell of a table. Spanned-over positions are not represented:
/// a row only lists the cells that actually start in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: String,

    pub typography: Typography,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,

    #[serde(default = "one")]
    pub colspan: u32,

    #[serde(default = "one")]
    pub rowspan: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_header: bool,
}

/// A row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub rows: Vec<Vec<TableCell>>,

    /// True when the first row is a header (`thead` or any `th` cell).
    pub header_row: bool,

    /// Column widths in source pixels, taken from the first row.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_widths: Vec<f64>,
}
