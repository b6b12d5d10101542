//! Cell hyperlinks: `<hyperlink>` elements resolved through the sheet's relationships.

use quick_xml::events::BytesStart;

use crate::cell_ref::parse_cell_ref;
use crate::types::Sheet;
use crate::xml_helpers::{attr_string, attr_string_local};

use super::relationships::Relationship;

/// A `<hyperlink>` as written in the sheet, before relationship lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawHyperlink {
    /// Cell reference or range, e.g. "A1" or "A1:B2"
    pub cell_ref: String,
    /// Relationship id for external targets
    pub r_id: Option<String>,
    /// In-workbook location such as "Sheet2!A1"
    pub location: Option<String>,
}

pub(crate) fn parse_hyperlink_element(e: &BytesStart<'_>) -> Option<RawHyperlink> {
    let cell_ref = attr_string(e, b"ref").filter(|s| !s.is_empty())?;
    Some(RawHyperlink {
        cell_ref,
        r_id: attr_string_local(e, b"id").filter(|s| !s.is_empty()),
        location: attr_string(e, b"location").filter(|s| !s.is_empty()),
    })
}

/// Link target for a raw hyperlink.
///
/// External targets come from the relationship, with any location appended
/// as a fragment; internal links become `#location`.
pub(crate) fn resolve_target(raw: &RawHyperlink, rels: &[Relationship]) -> Option<String> {
    if let Some(r_id) = &raw.r_id {
        let rel = rels
            .iter()
            .find(|r| &r.id == r_id && r.is_type("/hyperlink"))?;
        return Some(match &raw.location {
            Some(loc) => format!("{}#{loc}", rel.target),
            None => rel.target.clone(),
        });
    }
    raw.location.as_ref().map(|loc| format!("#{loc}"))
}

/// Attach resolved targets to the sheet's cells. Returns how many were applied.
///
/// A range applies to its top-left cell; links on unpopulated cells are dropped.
pub(crate) fn apply_hyperlinks(
    sheet: &mut Sheet,
    raw_links: Vec<RawHyperlink>,
    rels: &[Relationship],
) -> usize {
    let mut applied = 0;
    for raw in raw_links {
        let Some(url) = resolve_target(&raw, rels) else {
            log::debug!("{}: unresolved hyperlink on {}", sheet.name, raw.cell_ref);
            continue;
        };
        let first = raw.cell_ref.split(':').next().unwrap_or_default();
        let Some((col, row)) = parse_cell_ref(first) else {
            continue;
        };
        if let Some(cell) = sheet.cell_mut(row, col) {
            let value = std::mem::take(&mut cell.value);
            cell.value = value.with_link(url);
            applied += 1;
        }
    }
    applied
}
