//! Column-filtered, style-annotated description of a sheet, independent of output format.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::model::WorkbookModel;
use crate::types::CellStyle;

/// One visible cell.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellDescriptor {
    /// 1-based sheet column, not the visible position
    pub col: u32,
    pub text: String,
    pub style: CellStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub width_px: f64,
    pub height_px: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RowPlan {
    /// 1-based sheet row
    pub index: u32,
    pub height_px: f64,
    pub cells: Vec<CellDescriptor>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub sheet_name: String,
    pub sheet_index: usize,
    /// Visible sheet columns in order
    pub columns: Vec<u32>,
    pub rows: Vec<RowPlan>,
}

impl RenderPlan {
    #[must_use]
    pub fn row(&self, index: u32) -> Option<&RowPlan> {
        let i = usize::try_from(index.checked_sub(1)?).ok()?;
        self.rows.get(i)
    }

    /// Descriptor for a 1-based sheet cell, if it is visible.
    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellDescriptor> {
        let row = self.row(row)?;
        let pos = self.columns.binary_search(&col).ok()?;
        row.cells.get(pos)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Plan a sheet with default sizing.
pub fn plan(
    model: &WorkbookModel,
    sheet_index: usize,
    hidden_columns: &BTreeSet<u32>,
) -> Result<RenderPlan> {
    plan_with_config(model, sheet_index, hidden_columns, &ViewerConfig::default())
}

/// Every row up to the sheet's row extent, empty ones included, and in each a
/// descriptor for every column of the sheet's column extent that is not hidden.
///
/// Width hints come from the sheet's own column metadata, so hiding a column
/// never changes the width of its neighbors.
pub fn plan_with_config(
    model: &WorkbookModel,
    sheet_index: usize,
    hidden_columns: &BTreeSet<u32>,
    config: &ViewerConfig,
) -> Result<RenderPlan> {
    let sheet = model.sheet(sheet_index)?;

    let columns: Vec<u32> = (1..=sheet.column_count())
        .filter(|c| !hidden_columns.contains(c))
        .collect();
    let widths: Vec<f64> = columns
        .iter()
        .map(|&c| sheet.column_width_px(c, config.char_width_px, config.default_col_width_px))
        .collect();

    let rows = sheet
        .rows
        .iter()
        .map(|row| {
            let height_px = sheet.row_height_px(row.index, config.default_row_height_px);
            let cells = columns
                .iter()
                .zip(&widths)
                .map(|(&col, &width_px)| match row.cell(col) {
                    Some(cell) => CellDescriptor {
                        col,
                        text: cell.display_text().into_owned(),
                        style: cell.style,
                        link: cell.hyperlink().map(ToString::to_string),
                        width_px,
                        height_px,
                    },
                    None => CellDescriptor {
                        col,
                        text: String::new(),
                        style: CellStyle::default(),
                        link: None,
                        width_px,
                        height_px,
                    },
                })
                .collect();
            RowPlan {
                index: row.index,
                height_px,
                cells,
            }
        })
        .collect();

    Ok(RenderPlan {
        sheet_name: sheet.name.clone(),
        sheet_index,
        columns,
        rows,
    })
}
