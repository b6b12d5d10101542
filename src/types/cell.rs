use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{concat_runs, CellStyle, RichTextRun};

/// What a cell holds, as far as presentation is concerned.
///
/// Numbers, booleans and errors are already rendered to text by the codec.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellValue {
    #[default]
    Empty,
    Text {
        text: String,
    },
    RichText {
        runs: Vec<RichTextRun>,
    },
    Hyperlinked {
        text: String,
        url: String,
    },
}

impl CellValue {
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text { text }
        }
    }

    /// Display text. Rich runs concatenate in order, empty renders as "".
    #[must_use]
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Text { text } | Self::Hyperlinked { text, .. } => Cow::Borrowed(text),
            Self::RichText { runs } => Cow::Owned(concat_runs(runs)),
        }
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Hyperlinked { url, .. } => Some(url),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Attach a hyperlink target, keeping the current display text.
    #[must_use]
    pub fn with_link(self, url: String) -> Self {
        let text = self.display_text().into_owned();
        Self::Hyperlinked { text, url }
    }
}

/// A populated cell. Row and column are 1-based.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "CellStyle::is_plain")]
    pub style: CellStyle,
}

impl Cell {
    #[must_use]
    pub fn empty(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            value: CellValue::Empty,
            style: CellStyle::default(),
        }
    }

    #[must_use]
    pub fn display_text(&self) -> Cow<'_, str> {
        self.value.display_text()
    }

    #[must_use]
    pub fn hyperlink(&self) -> Option<&str> {
        self.value.link()
    }
}
