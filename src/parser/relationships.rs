//! Package relationships, sheet discovery and the shared strings table.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::error::{PortalError, Result};
use crate::types::SharedString;
use crate::xml_helpers::{attr_string, attr_string_local};

use super::rich_text::parse_string_item;

/// One `<Relationship>` from a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// Archive path for internal targets, the raw target for external ones
    pub target: String,
    pub external: bool,
}

impl Relationship {
    /// Relationship type suffix match, e.g. `"/drawing"` or `"/hyperlink"`.
    pub fn is_type(&self, suffix: &str) -> bool {
        self.rel_type.ends_with(suffix)
    }
}

/// Read the `.rels` part that belongs to `part_path`. A missing part yields no relationships.
pub(crate) fn parse_part_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    part_path: &str,
) -> Vec<Relationship> {
    let part_path = part_path.trim_start_matches('/');
    let rels_path = construct_rels_path(part_path);
    let base_dir = part_path.rsplit_once('/').map_or("", |(dir, _)| dir);

    let Ok(file) = archive.by_name(&rels_path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut rels = Vec::new();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e) | Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let id = attr_string(e, b"Id").unwrap_or_default();
                    let target = attr_string(e, b"Target").unwrap_or_default();
                    let rel_type = attr_string(e, b"Type").unwrap_or_default();
                    let external = attr_string(e, b"TargetMode").as_deref() == Some("External");

                    if !id.is_empty() && !target.is_empty() {
                        let target = if external {
                            target
                        } else {
                            resolve_relative_path(base_dir, &target)
                        };
                        rels.push(Relationship {
                            id,
                            rel_type,
                            target,
                            external,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("unreadable relationships part {rels_path}: {e}");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    rels
}

/// Workbook-level part paths from `xl/_rels/workbook.xml.rels`.
#[derive(Default, Debug)]
pub(super) struct WorkbookRelationships {
    /// rId -> worksheet path, e.g. "rId1" -> "xl/worksheets/sheet1.xml"
    pub worksheets: HashMap<String, String>,
    pub shared_strings: Option<String>,
    pub styles: Option<String>,
}

pub(super) fn parse_workbook_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> WorkbookRelationships {
    let mut rels = WorkbookRelationships::default();

    for rel in parse_part_relationships(archive, "xl/workbook.xml") {
        if rel.is_type("/worksheet") {
            rels.worksheets.insert(rel.id, rel.target);
        } else if rel.is_type("/sharedStrings") {
            rels.shared_strings = Some(rel.target);
        } else if rel.is_type("/styles") {
            rels.styles = Some(rel.target);
        }
    }

    rels
}

/// Sheet name and worksheet part, in workbook order.
#[derive(Debug, Clone)]
pub(super) struct SheetInfo {
    pub name: String,
    pub path: String,
}

/// Sheet names and paths from `xl/workbook.xml`.
///
/// A missing workbook part means the bytes are not a spreadsheet.
pub(super) fn get_sheet_info<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    relationships: &HashMap<String, String>,
) -> Result<Vec<SheetInfo>> {
    let file = archive
        .by_name("xl/workbook.xml")
        .map_err(|_| PortalError::Format("missing xl/workbook.xml".to_string()))?;

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut sheets = Vec::new();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e) | Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"sheet" {
                    let name = attr_string(e, b"name").unwrap_or_default();
                    let r_id = attr_string_local(e, b"id").unwrap_or_default();

                    if !name.is_empty() {
                        let path = relationships.get(&r_id).cloned().unwrap_or_else(|| {
                            let idx = sheets.len() + 1;
                            format!("xl/worksheets/sheet{idx}.xml")
                        });
                        sheets.push(SheetInfo { name, path });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Shared strings table. Optional; a workbook of numbers may not have one.
pub(super) fn parse_shared_strings<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: Option<&str>,
) -> Vec<SharedString> {
    let sst_path = path.unwrap_or("xl/sharedStrings.xml");
    let Ok(file) = archive.by_name(sst_path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"si" => {
                strings.push(parse_string_item(&mut xml, b"si"));
            }
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"si" => {
                strings.push(SharedString::Plain(String::new()));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("shared strings truncated after {} items: {e}", strings.len());
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    strings
}

/// "xl/worksheets/sheet1.xml" -> "xl/worksheets/_rels/sheet1.xml.rels"
pub(crate) fn construct_rels_path(part_path: &str) -> String {
    match part_path.rsplit_once('/') {
        Some((dir, filename)) => format!("{dir}/_rels/{filename}.rels"),
        None => format!("_rels/{part_path}.rels"),
    }
}

/// Resolve `relative` against `base_dir`, e.g. "../media/image1.png" from "xl/drawings".
pub(crate) fn resolve_relative_path(base_dir: &str, relative: &str) -> String {
    if let Some(stripped) = relative.strip_prefix('/') {
        return stripped.to_string();
    }

    let mut components: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for part in relative.split('/') {
        match part {
            ".." => {
                components.pop();
            }
            "." | "" => {}
            _ => components.push(part),
        }
    }

    components.join("/")
}
