//! Plain-text preview of an uploaded workbook, as shown to admins.

use crate::error::Result;
use crate::model::WorkbookModel;
use crate::types::Sheet;

/// One sheet as text: the first row is the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewSheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewSheet {
    fn from_sheet(sheet: &Sheet) -> Self {
        let width = sheet.column_count();
        let mut rows = sheet.rows.iter().map(|row| {
            (1..=width)
                .map(|col| {
                    row.cell(col)
                        .map(|c| c.display_text().into_owned())
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
        });
        let header = rows.next().unwrap_or_default();
        Self {
            name: sheet.name.clone(),
            header,
            rows: rows.collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilePreview {
    sheets: Vec<PreviewSheet>,
    active: usize,
    query: String,
}

impl FilePreview {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model = WorkbookModel::load(bytes)?;
        Ok(Self::from_model(&model))
    }

    #[must_use]
    pub fn from_model(model: &WorkbookModel) -> Self {
        Self {
            sheets: model
                .workbook()
                .sheets
                .iter()
                .map(PreviewSheet::from_sheet)
                .collect(),
            active: 0,
            query: String::new(),
        }
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn active_sheet(&self) -> Option<&PreviewSheet> {
        self.sheets.get(self.active)
    }

    /// Switch sheets by name; clears the filter. Unknown names are ignored.
    pub fn set_sheet(&mut self, name: &str) -> bool {
        let Some(index) = self.sheets.iter().position(|s| s.name == name) else {
            return false;
        };
        self.active = index;
        self.query.clear();
        true
    }

    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Data rows of the active sheet with any cell containing the query,
    /// case-insensitively. An empty query keeps every row.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&[String]> {
        let Some(sheet) = self.active_sheet() else {
            return Vec::new();
        };
        let needle = self.query.to_lowercase();
        sheet
            .rows
            .iter()
            .filter(|row| {
                needle.is_empty() || row.iter().any(|cell| cell.to_lowercase().contains(&needle))
            })
            .map(Vec::as_slice)
            .collect()
    }
}
