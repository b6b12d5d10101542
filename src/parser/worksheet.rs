//! Worksheet parsing - one sheet XML part into a [`Sheet`].

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::cell_ref::parse_cell_ref_bytes;
use crate::error::{PortalError, Result};
use crate::types::{Cell, CellStyle, ColWidth, Row, RowHeight, SharedString, Sheet};
use crate::xml_helpers::{attr_f64, attr_u32};

use super::hyperlinks::{parse_hyperlink_element, RawHyperlink};
use super::relationships::SheetInfo;
use super::rich_text::parse_string_item;
use super::styles::{resolve_cell_value, CellTypeTag};

/// Cells and rows beyond this are ignored rather than allocated.
const MAX_ROWS: u32 = 1_048_576;
const MAX_COLS: u32 = 16_384;

/// A parsed sheet plus the hyperlink elements that still need relationship lookup.
pub(super) struct ParsedSheet {
    pub sheet: Sheet,
    pub hyperlinks: Vec<RawHyperlink>,
}

pub(super) fn parse_sheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    info: &SheetInfo,
    shared_strings: &[SharedString],
    cell_styles: &[CellStyle],
) -> Result<ParsedSheet> {
    let file = archive.by_name(&info.path).map_err(|_| {
        PortalError::Format(format!("sheet '{}' has no part at {}", info.name, info.path))
    })?;

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut sheet = Sheet::new(info.name.clone());
    let mut cells: Vec<Cell> = Vec::new();
    let mut hyperlinks = Vec::new();

    let mut buf = Vec::new();
    let mut cell_buf = Vec::new();
    let mut current_row: u32 = 0;
    let mut last_declared_row: u32 = 0;
    let mut last_col: u32 = 0;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(ref e) | Event::Empty(ref e))) => {
                let is_start_event = matches!(event, Event::Start(_));

                match e.local_name().as_ref() {
                    b"sheetFormatPr" => {
                        sheet.default_col_width =
                            attr_f64(e, b"defaultColWidth").or_else(|| {
                                // baseColWidth excludes padding; Excel adds ~0.71 chars
                                attr_f64(e, b"baseColWidth").map(|w| w + 0.71)
                            });
                        sheet.default_row_height = attr_f64(e, b"defaultRowHeight");
                    }
                    b"col" => {
                        let min = attr_u32(e, b"min").unwrap_or(0);
                        let max = attr_u32(e, b"max").unwrap_or(min).min(MAX_COLS);
                        if let Some(width) = attr_f64(e, b"width") {
                            for col in min.max(1)..=max {
                                sheet.col_widths.push(ColWidth { col, width });
                            }
                        }
                    }
                    b"row" => {
                        current_row = attr_u32(e, b"r").unwrap_or(current_row.saturating_add(1));
                        if current_row <= MAX_ROWS {
                            last_declared_row = last_declared_row.max(current_row);
                        }
                        last_col = 0;
                        if let Some(height) = attr_f64(e, b"ht") {
                            sheet.row_heights.push(RowHeight {
                                row: current_row,
                                height,
                            });
                        }
                    }
                    b"c" => {
                        let mut position: Option<(u32, u32)> = None;
                        let mut cell_type = CellTypeTag::default();
                        let mut style_idx: Option<u32> = None;

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => position = parse_cell_ref_bytes(&attr.value),
                                b"t" => cell_type = CellTypeTag::from_attr(&attr.value),
                                b"s" => {
                                    style_idx = std::str::from_utf8(&attr.value)
                                        .ok()
                                        .and_then(|s| s.parse().ok());
                                }
                                _ => {}
                            }
                        }

                        // Cells without r follow the previous one
                        let (col, row) = position.unwrap_or((last_col + 1, current_row.max(1)));
                        last_col = col;

                        let mut value: Option<String> = None;
                        let mut inline: Option<SharedString> = None;
                        if is_start_event {
                            loop {
                                cell_buf.clear();
                                match xml.read_event_into(&mut cell_buf) {
                                    Ok(Event::Start(ref inner)) => match inner.local_name().as_ref() {
                                        b"v" => value = Some(read_value(&mut xml)),
                                        b"is" => inline = Some(parse_string_item(&mut xml, b"is")),
                                        _ => {}
                                    },
                                    Ok(Event::End(ref inner)) => {
                                        if inner.local_name().as_ref() == b"c" {
                                            break;
                                        }
                                    }
                                    Ok(Event::Eof) | Err(_) => break,
                                    _ => {}
                                }
                            }
                        }

                        if row > MAX_ROWS || col > MAX_COLS {
                            log::debug!("{}: skipping cell outside the grid at row {row} col {col}", info.name);
                        } else {
                            let style = style_idx
                                .and_then(|idx| usize::try_from(idx).ok())
                                .and_then(|idx| cell_styles.get(idx))
                                .copied()
                                .unwrap_or_default();
                            cells.push(Cell {
                                row,
                                col,
                                value: resolve_cell_value(
                                    value.as_deref(),
                                    inline,
                                    cell_type,
                                    shared_strings,
                                ),
                                style,
                            });
                        }
                    }
                    b"hyperlink" => {
                        if let Some(link) = parse_hyperlink_element(e) {
                            hyperlinks.push(link);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PortalError::Format(format!(
                    "sheet '{}' is malformed: {e}",
                    info.name
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    sheet.rows = build_rows(cells, last_declared_row);

    Ok(ParsedSheet { sheet, hyperlinks })
}

/// Text of a `<v>` element up to `</v>`.
fn read_value<R: std::io::BufRead>(xml: &mut Reader<R>) -> String {
    let mut buf = Vec::new();
    let mut text = String::new();
    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                if let Ok(s) = t.unescape() {
                    text.push_str(&s);
                }
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"v" => break,
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    text
}

/// Dense rows up to the last populated or declared row, cells sorted by column.
/// A later duplicate of the same coordinate wins.
fn build_rows(mut cells: Vec<Cell>, last_declared_row: u32) -> Vec<Row> {
    cells.sort_by_key(|c| (c.row, c.col));

    let mut rows: Vec<Row> = Vec::new();
    for cell in cells {
        while rows.last().map_or(0, |r| r.index) < cell.row {
            let next = rows.last().map_or(1, |r| r.index + 1);
            rows.push(Row::new(next));
        }
        if let Some(row) = rows.last_mut() {
            match row.cells.last_mut() {
                Some(prev) if prev.col == cell.col => *prev = cell,
                _ => row.cells.push(cell),
            }
        }
    }
    // Trailing rows with only a height still anchor images
    while rows.last().map_or(0, |r| r.index) < last_declared_row {
        let next = rows.last().map_or(1, |r| r.index + 1);
        rows.push(Row::new(next));
    }
    rows
}
