//! Named result presets: a target sheet plus the columns to hide there.
//!
//! Keys are letters handed out in sequence (`a`, `b`, … `z`, `aa`, `ab`, …)
//! from a counter that never goes backwards, so a key is never reissued.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell_ref::column_letters;
use crate::error::{PortalError, Result};

/// Persisted form of a preset, as stored on a client record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetting {
    pub sheet_name: String,
    /// Comma-separated 1-based column indices, e.g. "2, 4"
    #[serde(default)]
    pub hidden_columns: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultPreset {
    pub key: String,
    pub target_sheet: String,
    pub hidden_columns: Vec<u32>,
}

impl ResultPreset {
    #[must_use]
    pub fn to_setting(&self) -> ResultSetting {
        ResultSetting {
            sheet_name: self.target_sheet.clone(),
            hidden_columns: format_hidden_columns(&self.hidden_columns),
        }
    }
}

/// Letter key for the n-th preset (0-based).
#[must_use]
pub fn preset_key(n: usize) -> String {
    let n = u32::try_from(n).unwrap_or(u32::MAX - 1);
    column_letters(n + 1).to_ascii_lowercase()
}

/// Inverse of [`preset_key`] for keys made only of lowercase letters.
fn key_ordinal(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    let mut n: usize = 0;
    for b in key.bytes() {
        n = n.checked_mul(26)?.checked_add(usize::from(b - b'a') + 1)?;
    }
    n.checked_sub(1)
}

/// Parse "2, 4,x,7" into `[2, 4, 7]`.
///
/// Entries are trimmed and read up to the first non-digit; entries without a
/// leading digit are skipped.
#[must_use]
pub fn parse_hidden_columns(text: &str) -> Vec<u32> {
    text.split(',')
        .filter_map(|part| {
            let part = part.trim();
            let digits_end = part
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(part.len());
            part.get(..digits_end)?.parse().ok()
        })
        .collect()
}

#[must_use]
pub fn format_hidden_columns(columns: &[u32]) -> String {
    columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Presets of one presentation session, in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetCatalog {
    presets: Vec<ResultPreset>,
    next: usize,
}

impl PresetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted settings. The counter resumes after the highest
    /// letter key seen, so existing keys are never handed out again.
    #[must_use]
    pub fn from_settings(settings: &BTreeMap<String, ResultSetting>) -> Self {
        let mut presets: Vec<ResultPreset> = settings
            .iter()
            .map(|(key, setting)| ResultPreset {
                key: key.clone(),
                target_sheet: setting.sheet_name.clone(),
                hidden_columns: parse_hidden_columns(&setting.hidden_columns),
            })
            .collect();
        presets.sort_by(|a, b| (a.key.len(), &a.key).cmp(&(b.key.len(), &b.key)));

        let next = settings
            .keys()
            .filter_map(|k| key_ordinal(k))
            .max()
            .map_or(0, |n| n + 1)
            .max(settings.len());

        Self { presets, next }
    }

    #[must_use]
    pub fn to_settings(&self) -> BTreeMap<String, ResultSetting> {
        self.presets
            .iter()
            .map(|p| (p.key.clone(), p.to_setting()))
            .collect()
    }

    /// Append a preset under the next key and return that key.
    pub fn add(&mut self, target_sheet: impl Into<String>, hidden_columns: Vec<u32>) -> String {
        let mut key = preset_key(self.next);
        self.next += 1;
        // A hand-edited record can hold a later key already
        while self.get(&key).is_some() {
            key = preset_key(self.next);
            self.next += 1;
        }
        self.presets.push(ResultPreset {
            key: key.clone(),
            target_sheet: target_sheet.into(),
            hidden_columns,
        });
        key
    }

    /// Replace the target and columns of an existing preset.
    pub fn update(
        &mut self,
        key: &str,
        target_sheet: impl Into<String>,
        hidden_columns: Vec<u32>,
    ) -> Result<()> {
        let preset = self
            .presets
            .iter_mut()
            .find(|p| p.key == key)
            .ok_or_else(|| PortalError::NotFound {
                kind: "preset",
                name: key.to_string(),
            })?;
        preset.target_sheet = target_sheet.into();
        preset.hidden_columns = hidden_columns;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResultPreset> {
        self.presets.iter().find(|p| p.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultPreset> {
        self.presets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
