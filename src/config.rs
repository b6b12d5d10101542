//! Viewer configuration, loaded from camelCase JSON. Every field has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Column width when neither the column nor the sheet sets one
    pub default_col_width_px: f64,
    /// Row height when neither the row nor the sheet sets one
    pub default_row_height_px: f64,
    /// Max digit width used to turn character widths into pixels
    pub char_width_px: f64,
    /// Object-store prefix for published images: `{prefix}/{clientId}/{name}`
    pub image_key_prefix: String,
    /// Object-store prefix for uploaded files: `{prefix}/{clientId}/{name}`
    pub file_key_prefix: String,
    pub highlight_class: String,
    pub table_class: String,
    pub cell_class: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_col_width_px: 64.0,
            default_row_height_px: 20.0,
            char_width_px: 7.0,
            image_key_prefix: "images".to_string(),
            file_key_prefix: "files".to_string(),
            highlight_class: "search-highlight".to_string(),
            table_class: "excel-table".to_string(),
            cell_class: "excel-cell".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded viewer config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Object-store key for an embedded image published for a client.
    #[must_use]
    pub fn image_key(&self, client_id: &str, image_name: &str) -> String {
        format!("{}/{client_id}/{image_name}", self.image_key_prefix)
    }

    /// Object-store key for an uploaded client file.
    #[must_use]
    pub fn file_key(&self, client_id: &str, file_name: &str) -> String {
        format!("{}/{client_id}/{file_name}", self.file_key_prefix)
    }
}
