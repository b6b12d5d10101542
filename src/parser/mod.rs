//! XLSX parser
//!
//! Orchestrates parsing of the ZIP package: workbook relationships, sheet
//! order, shared strings, fonts, each worksheet with its hyperlinks and
//! drawing, and the media parts the drawings reference.

mod drawings;
mod hyperlinks;
mod relationships;
mod rich_text;
mod styles;
mod worksheet;

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

use crate::error::{PortalError, Result};
use crate::types::{Sheet, SheetImage, Workbook};

use drawings::{anchor_range, drawing_pictures, read_media};
use hyperlinks::apply_hyperlinks;
use relationships::{
    get_sheet_info, parse_part_relationships, parse_shared_strings, parse_workbook_relationships,
};
use styles::parse_stylesheet;
use worksheet::parse_sheet;

/// Parse an XLSX file from bytes.
pub fn parse(data: &[u8]) -> Result<Workbook> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)?;

    let relationships = parse_workbook_relationships(&mut archive);
    let shared_strings = parse_shared_strings(&mut archive, relationships.shared_strings.as_deref());
    let cell_styles = parse_stylesheet(&mut archive, relationships.styles.as_deref());
    let sheet_info = get_sheet_info(&mut archive, &relationships.worksheets)?;

    if sheet_info.is_empty() {
        return Err(PortalError::Format("workbook contains no sheets".to_string()));
    }

    let mut media = MediaTable::default();
    let mut sheets = Vec::with_capacity(sheet_info.len());

    for info in &sheet_info {
        let parsed = parse_sheet(&mut archive, info, &shared_strings, &cell_styles)?;
        let mut sheet = parsed.sheet;
        let rels = parse_part_relationships(&mut archive, &info.path);

        let linked = apply_hyperlinks(&mut sheet, parsed.hyperlinks, &rels);

        if let Some(drawing) = rels.iter().find(|r| r.is_type("/drawing") && !r.external) {
            sheet.images = load_sheet_images(&mut archive, &sheet, &drawing.target, &mut media);
        }

        log::debug!(
            "parsed sheet '{}': {} rows, {} cols, {} links, {} images",
            sheet.name,
            sheet.row_count(),
            sheet.column_count(),
            linked,
            sheet.images.len()
        );
        sheets.push(sheet);
    }

    Ok(Workbook {
        sheets,
        media: media.images,
    })
}

/// Media parts read so far, deduplicated by archive path.
#[derive(Default)]
struct MediaTable {
    images: Vec<crate::types::EmbeddedImage>,
    by_path: HashMap<String, usize>,
}

impl MediaTable {
    fn index_of<R: Read + Seek>(&mut self, archive: &mut ZipArchive<R>, path: &str) -> Option<usize> {
        if let Some(&idx) = self.by_path.get(path) {
            return Some(idx);
        }
        let image = read_media(archive, path)?;
        let idx = self.images.len();
        self.images.push(image);
        self.by_path.insert(path.to_string(), idx);
        Some(idx)
    }
}

fn load_sheet_images<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    sheet: &Sheet,
    drawing_path: &str,
    media: &mut MediaTable,
) -> Vec<SheetImage> {
    let pictures = drawing_pictures(archive, drawing_path);
    if pictures.is_empty() {
        return Vec::new();
    }
    let image_rels = parse_part_relationships(archive, drawing_path);

    let mut images = Vec::new();
    for pic in &pictures {
        let Some(rid) = pic.image_rid.as_deref() else {
            continue;
        };
        let Some(rel) = image_rels.iter().find(|r| r.id == rid && r.is_type("/image")) else {
            log::warn!("{}: image relationship {rid} not found in {drawing_path}", sheet.name);
            continue;
        };
        let Some(media_idx) = media.index_of(archive, &rel.target) else {
            log::warn!("{}: media part {} missing or empty", sheet.name, rel.target);
            continue;
        };
        let Some(anchor) = anchor_range(pic, sheet) else {
            log::debug!("{}: picture without a bottom-right anchor skipped", sheet.name);
            continue;
        };
        images.push(SheetImage {
            name: pic.name.clone(),
            media: media_idx,
            anchor,
            sheet_name: sheet.name.clone(),
        });
    }
    images
}
