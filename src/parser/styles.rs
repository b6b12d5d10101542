//! Cell fonts and value resolution.
//!
//! Only the font toggles the presenter renders are read from `styles.xml`;
//! fills, borders and number formats are skipped.

use std::io::{BufRead, BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::types::{CellStyle, CellValue, SharedString};
use crate::xml_helpers::{attr_u32, font_toggle};

/// Per-`cellXfs` index font style, read from the styles part.
///
/// A missing or unreadable styles part leaves every cell plain.
pub(super) fn parse_stylesheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: Option<&str>,
) -> Vec<CellStyle> {
    let styles_path = path.unwrap_or("xl/styles.xml");
    let Ok(file) = archive.by_name(styles_path) else {
        return Vec::new();
    };
    parse_styles(BufReader::new(file))
}

pub(super) fn parse_styles<R: BufRead>(reader: R) -> Vec<CellStyle> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut fonts: Vec<CellStyle> = Vec::new();
    let mut xf_font_ids: Vec<Option<u32>> = Vec::new();
    let mut buf = Vec::new();

    let mut in_fonts = false;
    let mut in_cell_xfs = false;
    let mut current_font: Option<CellStyle> = None;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(ref event @ (Event::Start(ref e) | Event::Empty(ref e))) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"fonts" if !is_empty => in_fonts = true,
                    b"cellXfs" if !is_empty => in_cell_xfs = true,
                    b"font" if in_fonts => {
                        if is_empty {
                            fonts.push(CellStyle::default());
                        } else {
                            current_font = Some(CellStyle::default());
                        }
                    }
                    b"b" => {
                        if let Some(ref mut font) = current_font {
                            font.bold = font_toggle(e);
                        }
                    }
                    b"i" => {
                        if let Some(ref mut font) = current_font {
                            font.italic = font_toggle(e);
                        }
                    }
                    b"u" => {
                        if let Some(ref mut font) = current_font {
                            font.underline = font_toggle(e);
                        }
                    }
                    b"xf" if in_cell_xfs => xf_font_ids.push(attr_u32(e, b"fontId")),
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = false,
                b"cellXfs" => in_cell_xfs = false,
                b"font" => {
                    if let Some(font) = current_font.take() {
                        fonts.push(font);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("styles part unreadable, cells render plain: {e}");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    xf_font_ids
        .into_iter()
        .map(|font_id| {
            font_id
                .and_then(|id| usize::try_from(id).ok())
                .and_then(|id| fonts.get(id).copied())
                .unwrap_or_default()
        })
        .collect()
}

/// The `t` attribute of a `<c>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum CellTypeTag {
    #[default]
    Number,
    Shared,
    Inline,
    Str,
    Bool,
    Error,
}

impl CellTypeTag {
    pub(super) fn from_attr(value: &[u8]) -> Self {
        match value {
            b"s" => Self::Shared,
            b"inlineStr" => Self::Inline,
            b"str" => Self::Str,
            b"b" => Self::Bool,
            b"e" => Self::Error,
            _ => Self::Number,
        }
    }
}

/// Turn the raw `<v>` (or parsed `<is>`) content of a cell into a display value.
pub(super) fn resolve_cell_value(
    raw_value: Option<&str>,
    inline: Option<SharedString>,
    cell_type: CellTypeTag,
    shared_strings: &[SharedString],
) -> CellValue {
    let from_string = |s: SharedString| match s {
        SharedString::Plain(text) => CellValue::text(text),
        SharedString::Rich(runs) => CellValue::RichText { runs },
    };

    match cell_type {
        CellTypeTag::Shared => raw_value
            .and_then(|v| v.trim().parse::<usize>().ok())
            .and_then(|idx| shared_strings.get(idx))
            .cloned()
            .map_or(CellValue::Empty, from_string),
        CellTypeTag::Inline => match inline {
            Some(s) => from_string(s),
            None => raw_value.map_or(CellValue::Empty, CellValue::text),
        },
        CellTypeTag::Str | CellTypeTag::Error => {
            raw_value.map_or(CellValue::Empty, CellValue::text)
        }
        CellTypeTag::Bool => match raw_value {
            Some("1" | "true") => CellValue::text("TRUE"),
            Some("0" | "false") => CellValue::text("FALSE"),
            other => other.map_or(CellValue::Empty, CellValue::text),
        },
        CellTypeTag::Number => raw_value.map_or(CellValue::Empty, |v| CellValue::text(format_number(v))),
    }
}

/// General-format rendering: integral values drop the decimal point,
/// everything else uses the shortest round-trip representation.
pub(super) fn format_number(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => format!("{n:.0}"),
        Ok(n) if n.is_finite() => n.to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::RichTextRun;
    use test_case::test_case;

    #[test_case("42", "42")]
    #[test_case("42.0", "42")]
    #[test_case("-3", "-3")]
    #[test_case("0.1", "0.1")]
    #[test_case("1.5E3", "1500")]
    #[test_case("2.25", "2.25")]
    #[test_case("abc", "abc")]
    fn numbers_format_like_general(raw: &str, expected: &str) {
        assert_eq!(format_number(raw), expected);
    }

    #[test]
    fn fonts_resolve_through_cell_xfs() {
        let xml = r#"<styleSheet>
            <fonts count="3">
                <font><sz val="11"/><name val="Calibri"/></font>
                <font><b/><i/><sz val="11"/></font>
                <font><u val="single"/><b val="0"/></font>
            </fonts>
            <cellXfs count="4">
                <xf fontId="0"/>
                <xf fontId="1" applyFont="1"/>
                <xf fontId="2"/>
                <xf fontId="9"/>
            </cellXfs>
        </styleSheet>"#;
        let styles = parse_styles(xml.as_bytes());
        assert_eq!(styles.len(), 4);
        assert!(styles[0].is_plain());
        assert!(styles[1].bold && styles[1].italic && !styles[1].underline);
        assert!(styles[2].underline && !styles[2].bold);
        assert!(styles[3].is_plain());
    }

    #[test]
    fn shared_and_bool_values() {
        let shared = vec![
            SharedString::Plain("alpha".to_string()),
            SharedString::Rich(vec![RichTextRun::plain("be"), RichTextRun::plain("ta")]),
        ];
        assert_eq!(
            resolve_cell_value(Some("0"), None, CellTypeTag::Shared, &shared),
            CellValue::text("alpha")
        );
        assert_eq!(
            resolve_cell_value(Some("1"), None, CellTypeTag::Shared, &shared)
                .display_text(),
            "beta"
        );
        assert_eq!(
            resolve_cell_value(Some("7"), None, CellTypeTag::Shared, &shared),
            CellValue::Empty
        );
        assert_eq!(
            resolve_cell_value(Some("1"), None, CellTypeTag::Bool, &shared),
            CellValue::text("TRUE")
        );
        assert_eq!(
            resolve_cell_value(None, None, CellTypeTag::Number, &shared),
            CellValue::Empty
        );
    }
}
