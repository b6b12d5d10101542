use serde::{Deserialize, Serialize};

/// Font attributes the presenter carries through to rendering.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl CellStyle {
    /// True when no attribute is set.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }
}

/// Explicit column width from `<cols>`, in Excel character units.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ColWidth {
    /// 1-based column index
    pub col: u32,
    pub width: f64,
}

/// Explicit row height from `<row ht>`, in points.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RowHeight {
    /// 1-based row index
    pub row: u32,
    pub height: f64,
}

/// Convert an Excel character width to pixels for the given max digit width.
#[must_use]
pub fn col_width_to_px(width: f64, digit_width: f64) -> f64 {
    if digit_width <= 0.0 {
        return 0.0;
    }
    ((width * digit_width + 5.0) / digit_width * 256.0).floor() / 256.0 * digit_width
}

/// Convert a height in points to pixels at 96 DPI.
#[must_use]
pub fn points_to_px(points: f64) -> f64 {
    points * (96.0 / 72.0)
}
