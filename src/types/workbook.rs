use serde::Serialize;

use super::{col_width_to_px, points_to_px, Cell, ColWidth, EmbeddedImage, RowHeight, SheetImage};

/// A row of populated cells, sorted by column. Columns without a cell are empty.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct Row {
    /// 1-based row index
    pub index: u32,
    pub cells: Vec<Cell>,
}

impl Row {
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Populated cell at a 1-based column.
    #[must_use]
    pub fn cell(&self, col: u32) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&col, |c| c.col)
            .ok()
            .and_then(|i| self.cells.get(i))
    }

    /// Highest populated column, 0 for an empty row.
    #[must_use]
    pub fn last_col(&self) -> u32 {
        self.cells.last().map_or(0, |c| c.col)
    }
}

/// A worksheet
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub name: String,
    /// Dense: `rows[i].index == i + 1` up to the row extent
    pub rows: Vec<Row>,
    pub col_widths: Vec<ColWidth>,
    pub row_heights: Vec<RowHeight>,
    /// `sheetFormatPr defaultColWidth`/`baseColWidth`, in characters
    pub default_col_width: Option<f64>,
    /// `sheetFormatPr defaultRowHeight`, in points
    pub default_row_height: Option<f64>,
    pub images: Vec<SheetImage>,
}

impl Sheet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Row extent: number of rows, counting empty ones before the last populated row.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    /// Column extent: highest populated column across all rows.
    #[must_use]
    pub fn column_count(&self) -> u32 {
        self.rows.iter().map(Row::last_col).max().unwrap_or(0)
    }

    /// Row at a 1-based index.
    #[must_use]
    pub fn row(&self, index: u32) -> Option<&Row> {
        let i = usize::try_from(index.checked_sub(1)?).ok()?;
        self.rows.get(i)
    }

    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.row(row).and_then(|r| r.cell(col))
    }

    pub(crate) fn cell_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        let i = usize::try_from(row.checked_sub(1)?).ok()?;
        let row = self.rows.get_mut(i)?;
        let pos = row.cells.binary_search_by_key(&col, |c| c.col).ok()?;
        row.cells.get_mut(pos)
    }

    /// Explicit column width in characters, if `<cols>` set one.
    #[must_use]
    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.col_widths
            .iter()
            .find(|cw| cw.col == col)
            .map(|cw| cw.width)
    }

    /// Explicit row height in points, if the row set one.
    #[must_use]
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights
            .iter()
            .find(|rh| rh.row == row)
            .map(|rh| rh.height)
    }

    /// Column width in pixels, falling back to the sheet default and then `fallback_px`.
    #[must_use]
    pub fn column_width_px(&self, col: u32, char_width_px: f64, fallback_px: f64) -> f64 {
        match self.column_width(col).or(self.default_col_width) {
            Some(w) => col_width_to_px(w, char_width_px),
            None => fallback_px,
        }
    }

    /// Row height in pixels, falling back to the sheet default and then `fallback_px`.
    #[must_use]
    pub fn row_height_px(&self, row: u32, fallback_px: f64) -> f64 {
        match self.row_height(row).or(self.default_row_height) {
            Some(pt) => points_to_px(pt),
            None => fallback_px,
        }
    }
}

/// A parsed workbook. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    /// Media parts referenced by [`SheetImage::media`]
    pub media: Vec<EmbeddedImage>,
}
