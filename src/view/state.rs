use std::collections::BTreeSet;

use crate::error::{PortalError, Result};
use crate::model::WorkbookModel;

use super::presets::{PresetCatalog, ResultPreset};
use super::search::{SearchMatch, SearchState};

/// Everything a viewer has selected for the current workbook.
///
/// Switching sheets always clears hidden columns and search, since both are
/// specific to one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    active_sheet: usize,
    hidden_columns: BTreeSet<u32>,
    search: SearchState,
    presets: PresetCatalog,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_presets(presets: PresetCatalog) -> Self {
        Self {
            presets,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    #[must_use]
    pub fn hidden_columns(&self) -> &BTreeSet<u32> {
        &self.hidden_columns
    }

    #[must_use]
    pub fn is_hidden(&self, col: u32) -> bool {
        self.hidden_columns.contains(&col)
    }

    #[must_use]
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    #[must_use]
    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    pub fn presets_mut(&mut self) -> &mut PresetCatalog {
        &mut self.presets
    }

    pub fn set_active_sheet(&mut self, model: &WorkbookModel, index: usize) -> Result<()> {
        let len = model.sheet_count();
        if index >= len {
            return Err(PortalError::Range {
                what: "sheet",
                index,
                len,
            });
        }
        self.active_sheet = index;
        self.hidden_columns.clear();
        self.search.clear();
        Ok(())
    }

    /// Replace the hidden set. Columns past the sheet's extent are kept and never match.
    pub fn set_hidden_columns(&mut self, columns: impl IntoIterator<Item = u32>) {
        self.hidden_columns = columns.into_iter().collect();
    }

    /// Append a preset under the next letter key.
    pub fn add_result_preset(&mut self, target_sheet: &str, hidden_columns: Vec<u32>) -> String {
        self.presets.add(target_sheet, hidden_columns)
    }

    /// Switch to a preset's sheet and hide its columns.
    ///
    /// Returns `Ok(None)` for an unknown key, leaving the view untouched.
    /// Search is cleared even when the preset targets the active sheet.
    pub fn apply_result_preset(
        &mut self,
        model: &WorkbookModel,
        key: &str,
    ) -> Result<Option<ResultPreset>> {
        let Some(preset) = self.presets.get(key).cloned() else {
            log::debug!("no result preset under key {key}");
            return Ok(None);
        };
        let index = model
            .sheet_index(&preset.target_sheet)
            .ok_or_else(|| PortalError::sheet_not_found(&preset.target_sheet))?;
        self.set_active_sheet(model, index)?;
        self.set_hidden_columns(preset.hidden_columns.iter().copied());
        Ok(Some(preset))
    }

    /// Search the active sheet. Returns the match count.
    pub fn search(&mut self, model: &WorkbookModel, query: &str) -> Result<usize> {
        self.search.run(model, self.active_sheet, query)
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn next_match(&mut self) -> Option<&SearchMatch> {
        self.search.next()
    }

    pub fn previous_match(&mut self) -> Option<&SearchMatch> {
        self.search.previous()
    }

    /// Back to the first sheet with nothing hidden, for a newly loaded workbook.
    /// Presets survive.
    pub fn reset(&mut self) {
        self.active_sheet = 0;
        self.hidden_columns.clear();
        self.search.clear();
    }
}
