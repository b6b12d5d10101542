//! Embedded pictures from `xl/drawings/drawing*.xml`.
//!
//! Each sheet has at most one drawing part, found through the sheet's
//! relationships. Pictures reference their bytes with `r:embed`, resolved
//! through the drawing's own relationships into `xl/media/`.
//!
//! Anchors are converted to fractional 0-based cell coordinates. Offsets are
//! measured against a per-cell unit size: `floor(width * 10000)` for a column
//! with an explicit width, 640000 otherwise; rows use `floor(height_pt * 10000)`
//! or 180000. Charts, shapes and absolute anchors are not pictures of cells and
//! are skipped.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufRead, BufReader, Read, Seek};
use zip::ZipArchive;

use crate::types::{AnchorRange, EmbeddedImage, Sheet};
use crate::xml_helpers::{attr_string, attr_string_local};

const DEFAULT_COL_UNIT: f64 = 640_000.0;
const DEFAULT_ROW_UNIT: f64 = 180_000.0;
/// Upper bound on cells walked when sizing a oneCellAnchor extent
const MAX_EXTENT_WALK: u32 = 16_384;

/// `<xdr:from>` / `<xdr:to>` marker: 0-based cell plus offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CellOffset {
    pub col: u32,
    pub col_off: i64,
    pub row: u32,
    pub row_off: i64,
}

/// A picture anchor as written in the drawing part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawPicture {
    pub name: Option<String>,
    pub image_rid: Option<String>,
    pub from: CellOffset,
    pub to: Option<CellOffset>,
    /// `(cx, cy)` of a oneCellAnchor
    pub extent: Option<(i64, i64)>,
}

/// Parse picture anchors from drawing XML.
pub(crate) fn parse_drawing_xml<R: BufRead>(reader: R) -> Vec<RawPicture> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut pictures = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<RawPicture> = None;
    let mut is_picture = false;
    let mut marker: Option<CellOffset> = None;
    let mut in_from = false;
    let mut current_element: Option<Vec<u8>> = None;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(ref e) | Event::Empty(ref e))) => {
                let is_start = matches!(event, Event::Start(_));
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"twoCellAnchor" | b"oneCellAnchor" if is_start => {
                        current = Some(RawPicture::default());
                        is_picture = false;
                    }
                    b"from" | b"to" if is_start && current.is_some() => {
                        in_from = local_name.as_ref() == b"from";
                        marker = Some(CellOffset::default());
                    }
                    b"ext" => {
                        // Only the anchor-level extent; xfrm/ext inside spPr repeats it
                        if let Some(ref mut pic) = current {
                            if pic.extent.is_none() && !is_picture {
                                let cx = attr_string(e, b"cx").and_then(|s| s.parse().ok());
                                let cy = attr_string(e, b"cy").and_then(|s| s.parse().ok());
                                if let (Some(cx), Some(cy)) = (cx, cy) {
                                    pic.extent = Some((cx, cy));
                                }
                            }
                        }
                    }
                    b"pic" => is_picture = true,
                    b"cNvPr" if is_picture => {
                        if let Some(ref mut pic) = current {
                            pic.name = attr_string(e, b"name");
                        }
                    }
                    b"blip" if is_picture => {
                        if let Some(ref mut pic) = current {
                            pic.image_rid = attr_string_local(e, b"embed");
                        }
                    }
                    name @ (b"col" | b"colOff" | b"row" | b"rowOff") if marker.is_some() => {
                        current_element = Some(name.to_vec());
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref t)) => {
                if let (Some(element), Some(ref mut m)) = (&current_element, &mut marker) {
                    if let Ok(text) = t.unescape() {
                        let text = text.trim();
                        match element.as_slice() {
                            b"col" => m.col = text.parse().unwrap_or(0),
                            b"row" => m.row = text.parse().unwrap_or(0),
                            b"colOff" => m.col_off = text.parse().unwrap_or(0),
                            b"rowOff" => m.row_off = text.parse().unwrap_or(0),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"twoCellAnchor" | b"oneCellAnchor" => {
                    if let Some(pic) = current.take() {
                        if is_picture && pic.image_rid.is_some() {
                            pictures.push(pic);
                        }
                    }
                    is_picture = false;
                }
                b"from" | b"to" => {
                    if let (Some(m), Some(ref mut pic)) = (marker.take(), &mut current) {
                        if in_from {
                            pic.from = m;
                        } else {
                            pic.to = Some(m);
                        }
                    }
                }
                b"col" | b"colOff" | b"row" | b"rowOff" => current_element = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("drawing part truncated: {e}");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    pictures
}

/// Picture anchors from a drawing part, or none if it is missing.
pub(crate) fn drawing_pictures<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    drawing_path: &str,
) -> Vec<RawPicture> {
    match archive.by_name(drawing_path.trim_start_matches('/')) {
        Ok(file) => parse_drawing_xml(BufReader::new(file)),
        Err(e) => {
            log::warn!("drawing {drawing_path} not readable: {e}");
            Vec::new()
        }
    }
}

/// Read a media part. Empty or missing parts yield `None`.
pub(crate) fn read_media<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Option<EmbeddedImage> {
    let path = path.trim_start_matches('/');
    let mut file = archive.by_name(path).ok()?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).ok()?;
    if data.is_empty() {
        return None;
    }
    Some(EmbeddedImage::new(path.to_string(), data))
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(v: i64) -> f64 {
    v as f64
}

fn col_unit(sheet: &Sheet, col: u32) -> f64 {
    sheet
        .column_width(col.saturating_add(1))
        .map_or(DEFAULT_COL_UNIT, |w| (w * 10_000.0).floor().max(1.0))
}

fn row_unit(sheet: &Sheet, row: u32) -> f64 {
    sheet
        .row_height(row.saturating_add(1))
        .map_or(DEFAULT_ROW_UNIT, |h| (h * 10_000.0).floor().max(1.0))
}

fn fractional(index: u32, offset: i64, unit: f64) -> f64 {
    f64::from(index) + to_f64(offset.max(0)).min(unit - 1.0) / unit
}

/// Walk `extent` units forward from a marker, one cell at a time.
fn walk_extent(start: u32, offset: i64, extent: i64, unit: impl Fn(u32) -> f64) -> f64 {
    let mut index = start;
    let mut remaining = to_f64(offset.max(0)) + to_f64(extent.max(0));
    let mut steps = 0;
    while steps < MAX_EXTENT_WALK {
        let size = unit(index);
        if remaining < size {
            break;
        }
        remaining -= size;
        index = index.saturating_add(1);
        steps += 1;
    }
    f64::from(index) + remaining / unit(index)
}

/// Fractional anchor range for a picture, using the sheet's column and row sizes.
///
/// A oneCellAnchor's bottom-right comes from its extent. Without either a
/// `to` marker or an extent there is nothing to place.
pub(crate) fn anchor_range(pic: &RawPicture, sheet: &Sheet) -> Option<AnchorRange> {
    let from = pic.from;
    let tl_col = fractional(from.col, from.col_off, col_unit(sheet, from.col));
    let tl_row = fractional(from.row, from.row_off, row_unit(sheet, from.row));

    let (br_row, br_col) = match (pic.to, pic.extent) {
        (Some(to), _) => (
            fractional(to.row, to.row_off, row_unit(sheet, to.row)),
            fractional(to.col, to.col_off, col_unit(sheet, to.col)),
        ),
        (None, Some((cx, cy))) => (
            walk_extent(from.row, from.row_off, cy, |r| row_unit(sheet, r)),
            walk_extent(from.col, from.col_off, cx, |c| col_unit(sheet, c)),
        ),
        (None, None) => return None,
    };

    Some(AnchorRange::new(tl_row, tl_col, br_row, br_col))
}
