//! Free-text search over a sheet's cell text.

use serde::Serialize;

use crate::error::Result;
use crate::model::WorkbookModel;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// 1-based row
    pub row: u32,
    /// 1-based column
    pub col: u32,
    pub text: String,
}

/// Case-insensitive substring search over every populated cell of a sheet,
/// row-major. Hidden columns are a render concern and are searched too.
pub fn search(model: &WorkbookModel, sheet_index: usize, query: &str) -> Result<Vec<SearchMatch>> {
    let sheet = model.sheet(sheet_index)?;
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let needle = query.to_lowercase();

    let mut matches = Vec::new();
    for row in &sheet.rows {
        for cell in &row.cells {
            let text = cell.display_text();
            if text.to_lowercase().contains(&needle) {
                matches.push(SearchMatch {
                    row: cell.row,
                    col: cell.col,
                    text: text.into_owned(),
                });
            }
        }
    }
    Ok(matches)
}

/// Query, results and cursor of the current search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl SearchState {
    /// Run a search; the cursor lands on the first match if there is one.
    pub fn run(&mut self, model: &WorkbookModel, sheet_index: usize, query: &str) -> Result<usize> {
        let matches = search(model, sheet_index, query)?;
        self.query = query.to_string();
        self.current = if matches.is_empty() { None } else { Some(0) };
        self.matches = matches;
        Ok(self.matches.len())
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current = None;
    }

    /// Advance with wraparound. No-op without matches.
    pub fn next(&mut self) -> Option<&SearchMatch> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        let i = self.current.map_or(0, |i| (i + 1) % n);
        self.current = Some(i);
        self.matches.get(i)
    }

    /// Step back with wraparound. No-op without matches.
    pub fn previous(&mut self) -> Option<&SearchMatch> {
        let n = self.matches.len();
        if n == 0 {
            return None;
        }
        let i = self.current.map_or(n - 1, |i| (i + n - 1) % n);
        self.current = Some(i);
        self.matches.get(i)
    }

    #[must_use]
    pub fn current(&self) -> Option<&SearchMatch> {
        self.current.and_then(|i| self.matches.get(i))
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.query.is_empty()
    }

    /// "3/7" for the third of seven matches, "0/0" with none.
    #[must_use]
    pub fn position_label(&self) -> String {
        match self.current {
            Some(i) if !self.matches.is_empty() => format!("{}/{}", i + 1, self.matches.len()),
            _ => "0/0".to_string(),
        }
    }
}
