use serde::{Deserialize, Serialize};

use super::CellStyle;

/// A single run of text with optional styling
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RichTextRun {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

impl RichTextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }
}

/// Shared string entry - can be plain text or rich text
#[derive(Debug, Clone, PartialEq)]
pub enum SharedString {
    Plain(String),
    Rich(Vec<RichTextRun>),
}

impl SharedString {
    /// Get the plain text representation (concatenated for rich text)
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            SharedString::Plain(s) => s.clone(),
            SharedString::Rich(runs) => concat_runs(runs),
        }
    }
}

/// Concatenate run texts in order.
#[must_use]
pub fn concat_runs(runs: &[RichTextRun]) -> String {
    let total_len: usize = runs.iter().map(|r| r.text.len()).sum();
    let mut combined = String::with_capacity(total_len);
    for run in runs {
        combined.push_str(&run.text);
    }
    combined
}
