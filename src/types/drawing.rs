use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// A position in fractional sheet coordinates, 0-based.
///
/// `col = 2.5` is halfway across the third column.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct AnchorPoint {
    pub row: f64,
    pub col: f64,
}

/// Rectangle an image covers on its sheet.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnchorRange {
    pub top_left: AnchorPoint,
    pub bottom_right: AnchorPoint,
}

impl AnchorRange {
    #[must_use]
    pub fn new(tl_row: f64, tl_col: f64, br_row: f64, br_col: f64) -> Self {
        Self {
            top_left: AnchorPoint {
                row: tl_row,
                col: tl_col,
            },
            bottom_right: AnchorPoint {
                row: br_row,
                col: br_col,
            },
        }
    }

    #[must_use]
    pub fn row_span(&self) -> f64 {
        self.bottom_right.row - self.top_left.row
    }

    #[must_use]
    pub fn col_span(&self) -> f64 {
        self.bottom_right.col - self.top_left.col
    }
}

/// Image format detected from magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Unknown,
}

impl ImageFormat {
    /// Detect image format from magic bytes
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        match data {
            [0x89, b'P', b'N', b'G', ..] => Self::Png,
            [0xFF, 0xD8, 0xFF, ..] => Self::Jpeg,
            [b'G', b'I', b'F', b'8', ..] => Self::Gif,
            [b'B', b'M', ..] => Self::Bmp,
            _ => Self::Unknown,
        }
    }

    /// Get MIME type string
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// Raw media part owned by the workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    /// Archive path, e.g. `xl/media/image1.png`
    pub path: String,
    pub data: Vec<u8>,
    pub format: ImageFormat,
}

impl EmbeddedImage {
    #[must_use]
    pub fn new(path: String, data: Vec<u8>) -> Self {
        let format = ImageFormat::from_magic_bytes(&data);
        Self { path, data, format }
    }

    /// File name portion of the archive path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// `data:` URI suitable for an `<img src>` when no object store is wired up.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.data))
    }
}

/// An image placed on a sheet.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetImage {
    /// Drawing name from `cNvPr`, if any
    pub name: Option<String>,
    /// Index into [`super::Workbook::media`]
    pub media: usize,
    pub anchor: AnchorRange,
    pub sheet_name: String,
}
