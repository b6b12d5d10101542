//! Positioning embedded images over a rendered grid.
//!
//! The anchor's corners are snapped to whole cells: the top-left corner to the
//! cell whose 0-based index rounds to it, the bottom-right corner to the cell
//! ending at its rounded position. The image box spans those two cells and is
//! then scaled per axis by `pixel span / fractional span`. This is an
//! approximation of the spreadsheet's own rendering, not a pixel match.

use serde::Serialize;

use crate::model::WorkbookModel;
use crate::types::{AnchorRange, SheetImage};

use super::geometry::{GridGeometry, PixelRect};

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl OverlayPlacement {
    /// Inline style for an absolutely positioned `<img>`.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "position:absolute;top:{}px;left:{}px;width:{}px;height:{}px;object-fit:contain;\
             z-index:10;transform:scale({}, {});transform-origin:top left",
            fmt_num(self.top),
            fmt_num(self.left),
            fmt_num(self.width),
            fmt_num(self.height),
            fmt_num(self.scale_x),
            fmt_num(self.scale_y),
        )
    }
}

/// Up to three decimals, trailing zeros dropped.
fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// An image ready to draw: where to get it and where to put it.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageOverlay {
    pub src: String,
    pub name: Option<String>,
    pub placement: OverlayPlacement,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_index(v: f64) -> Option<u32> {
    let r = v.round();
    if !r.is_finite() || r < 0.0 || r > f64::from(u32::MAX) {
        return None;
    }
    Some(r as u32)
}

/// 1-based (row, col) of the top-left and bottom-right cells an anchor covers.
#[must_use]
pub fn anchor_cells(anchor: &AnchorRange) -> Option<((u32, u32), (u32, u32))> {
    let tl_row = rounded_index(anchor.top_left.row)?.checked_add(1)?;
    let tl_col = rounded_index(anchor.top_left.col)?.checked_add(1)?;
    let br_row = rounded_index(anchor.bottom_right.row)?.max(tl_row);
    let br_col = rounded_index(anchor.bottom_right.col)?.max(tl_col);
    Some(((tl_row, tl_col), (br_row, br_col)))
}

/// Placement of an anchor over a grid, or `None` when either corner cell was
/// not rendered or the anchor has no extent.
pub fn place_image<G: GridGeometry + ?Sized>(
    anchor: &AnchorRange,
    grid: &G,
) -> Option<OverlayPlacement> {
    let span_cols = anchor.col_span();
    let span_rows = anchor.row_span();
    if !(span_cols > 0.0 && span_rows > 0.0) {
        return None;
    }

    let ((tl_row, tl_col), (br_row, br_col)) = anchor_cells(anchor)?;
    let start: PixelRect = grid.cell_rect(tl_row, tl_col)?;
    let end: PixelRect = grid.cell_rect(br_row, br_col)?;

    let width = end.right() - start.x;
    let height = end.bottom() - start.y;

    Some(OverlayPlacement {
        left: start.x,
        top: start.y,
        width,
        height,
        scale_x: width / span_cols,
        scale_y: height / span_rows,
    })
}

/// Overlays for every placeable image on a sheet.
///
/// `src_for` supplies each image's URL; images without one, or that cannot be
/// placed, are skipped.
pub fn place_images<G, F>(
    model: &WorkbookModel,
    sheet_name: &str,
    grid: &G,
    mut src_for: F,
) -> Vec<ImageOverlay>
where
    G: GridGeometry + ?Sized,
    F: FnMut(&SheetImage) -> Option<String>,
{
    model
        .images_for(sheet_name)
        .into_iter()
        .filter_map(|image| {
            let Some(placement) = place_image(&image.anchor, grid) else {
                log::debug!(
                    "{sheet_name}: image {:?} has no rendered anchor cells",
                    image.name
                );
                return None;
            };
            let src = src_for(image)?;
            Some(ImageOverlay {
                src,
                name: image.name.clone(),
                placement,
            })
        })
        .collect()
}
