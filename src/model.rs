//! Read-only workbook adapter.
//!
//! [`WorkbookModel`] wraps a parsed [`Workbook`] so view code never touches the
//! codec's shapes directly. All view concerns live in [`crate::view`].

use std::borrow::Cow;

use crate::error::{PortalError, Result};
use crate::parser;
use crate::types::{Cell, EmbeddedImage, Sheet, SheetImage, Workbook};

/// Turns raw bytes into a [`Workbook`].
pub trait SpreadsheetCodec {
    /// Parse bytes. Failures are format errors.
    fn parse(&self, bytes: &[u8]) -> Result<Workbook>;
}

/// The built-in XLSX codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxCodec;

impl SpreadsheetCodec for XlsxCodec {
    fn parse(&self, bytes: &[u8]) -> Result<Workbook> {
        parser::parse(bytes)
    }
}

#[derive(Debug, Clone)]
pub struct WorkbookModel {
    workbook: Workbook,
}

impl WorkbookModel {
    /// Parse XLSX bytes.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        Self::load_with(&XlsxCodec, bytes)
    }

    pub fn load_with<C: SpreadsheetCodec + ?Sized>(codec: &C, bytes: &[u8]) -> Result<Self> {
        let workbook = codec.parse(bytes)?;
        Self::from_workbook(workbook)
    }

    /// Wrap an already-parsed workbook. A workbook needs at least one sheet.
    pub fn from_workbook(workbook: Workbook) -> Result<Self> {
        if workbook.sheets.is_empty() {
            return Err(PortalError::Format("workbook contains no sheets".to_string()));
        }
        Ok(Self { workbook })
    }

    #[must_use]
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.workbook.sheets.len()
    }

    pub fn sheet(&self, index: usize) -> Result<&Sheet> {
        self.workbook.sheets.get(index).ok_or(PortalError::Range {
            what: "sheet",
            index,
            len: self.workbook.sheets.len(),
        })
    }

    /// Index of the sheet with this exact name.
    #[must_use]
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.workbook.sheets.iter().position(|s| s.name == name)
    }

    /// Cell at 1-based coordinates; an empty cell when unpopulated.
    ///
    /// Only an invalid sheet index is an error.
    pub fn cell_at(&self, sheet: usize, row: u32, col: u32) -> Result<Cow<'_, Cell>> {
        let sheet = self.sheet(sheet)?;
        Ok(sheet
            .cell(row, col)
            .map_or_else(|| Cow::Owned(Cell::empty(row, col)), Cow::Borrowed))
    }

    /// Images anchored to the named sheet; empty for an unknown name.
    #[must_use]
    pub fn images_for(&self, sheet_name: &str) -> Vec<&SheetImage> {
        self.workbook
            .sheets
            .iter()
            .filter(|s| s.name == sheet_name)
            .flat_map(|s| s.images.iter())
            .collect()
    }

    /// Bytes of an image.
    #[must_use]
    pub fn media(&self, image: &SheetImage) -> Option<&EmbeddedImage> {
        self.workbook.media.get(image.media)
    }
}
