//! Structured error types for xlportal.
//!
//! Load-time failures (`Io`, `Fetch`, and the format family) abort a file load.
//! `Range` and `NotFound` come out of view operations and are recoverable at
//! the session level.

/// All errors that can occur while loading, viewing, or administering workbooks.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Byte retrieval failed on the local filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Byte retrieval failed in a remote or in-memory collaborator.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// ZIP container is unreadable.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML part is malformed.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Bytes are not a parseable spreadsheet.
    #[error("Format error: {0}")]
    Format(String),

    /// Sheet or column index out of bounds.
    #[error("{what} index {index} out of range (0..{len})")]
    Range {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Named sheet, preset, client or file does not resolve.
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// Rejected input from an admin operation.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// JSON (de)serialization of config or directory data.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    pub(crate) fn sheet_not_found(name: &str) -> Self {
        Self::NotFound {
            kind: "sheet",
            name: name.to_string(),
        }
    }

    /// True for failures to retrieve bytes.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Fetch(_))
    }

    /// True when the bytes were retrieved but could not be parsed as a workbook.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Zip(_) | Self::Xml(_) | Self::Format(_))
    }
}

impl From<PortalError> for wasm_bindgen::JsValue {
    fn from(e: PortalError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
