//! xlportal - spreadsheet result presenter for a client portal
//!
//! Loads an XLSX workbook and presents one sheet at a time as an HTML table:
//! - Bold/italic/underline text, rich text runs and hyperlinks
//! - Column widths and row heights from the sheet
//! - Embedded images overlaid on the cells they are anchored to
//! - Hidden columns, named result presets and case-insensitive search
//!
//! # Usage (Rust)
//!
//! ```no_run
//! use xlportal::{model::WorkbookModel, render::render_view, view::ViewState, ViewerConfig};
//!
//! # fn main() -> xlportal::Result<()> {
//! let bytes = std::fs::read("results.xlsx")?;
//! let model = WorkbookModel::load(&bytes)?;
//! let mut view = ViewState::new();
//! view.set_hidden_columns([2, 4]);
//! view.search(&model, "total")?;
//! let html = render_view(&model, &view, &ViewerConfig::default(), None, |_| None)?;
//! # let _ = html;
//! # Ok(())
//! # }
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { PortalViewer } from 'xlportal';
//! await init();
//! const viewer = new PortalViewer();
//! viewer.load(data);
//! viewer.attach(container);
//! viewer.render();
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod types;
pub mod xml_helpers;

pub mod layout;
pub mod portal;
pub mod render;
pub mod view;
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use config::ViewerConfig;
pub use error::{PortalError, Result};
pub use types::*;
pub use wasm::PortalViewer;

/// Parse an XLSX file and return its sheets as a JSON string.
///
/// # Errors
/// Returns an error if the XLSX file is invalid or cannot be parsed.
#[wasm_bindgen]
pub fn parse_xlsx(data: &[u8]) -> std::result::Result<String, JsValue> {
    let workbook = parser::parse(data)?;

    serde_json::to_string(&workbook.sheets)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}
