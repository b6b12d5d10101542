//! String items: `<si>` in the shared strings table and `<is>` inline strings.
//!
//! ```xml
//! <si><t>Plain text</t></si>
//! <si>
//!   <r><rPr><b/></rPr><t>Styled</t></r>
//!   <r><t> normal</t></r>
//! </si>
//! ```

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::types::{CellStyle, RichTextRun, SharedString};
use crate::xml_helpers::font_toggle;

/// Read a string item up to its closing `end_tag` (`si` or `is`).
///
/// Runs win over a bare `<t>`; phonetic `<rPh>` hints are skipped.
pub(crate) fn parse_string_item<R: BufRead>(xml: &mut Reader<R>, end_tag: &[u8]) -> SharedString {
    let mut buf = Vec::new();
    let mut plain: Option<String> = None;
    let mut runs: Vec<RichTextRun> = Vec::new();
    let mut in_phonetic = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"rPh" => in_phonetic = true,
                b"t" if !in_phonetic => {
                    let text = read_text(xml);
                    plain.get_or_insert_with(String::new).push_str(&text);
                }
                b"r" if !in_phonetic => runs.push(parse_run(xml)),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"t" && !in_phonetic {
                    plain.get_or_insert_with(String::new);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                if name.as_ref() == b"rPh" {
                    in_phonetic = false;
                } else if name.as_ref() == end_tag {
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    if runs.is_empty() {
        SharedString::Plain(plain.unwrap_or_default())
    } else {
        SharedString::Rich(runs)
    }
}

/// Parse one `<r>` run after its start tag has been consumed.
fn parse_run<R: BufRead>(xml: &mut Reader<R>) -> RichTextRun {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut style: Option<CellStyle> = None;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"rPr" => style = Some(parse_run_properties(xml)),
                b"t" => text.push_str(&read_text(xml)),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"rPr" {
                    style = Some(CellStyle::default());
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"r" {
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    RichTextRun { text, style }
}

/// Bold, italic and underline out of `<rPr>`. Size, color and font are ignored.
fn parse_run_properties<R: BufRead>(xml: &mut Reader<R>) -> CellStyle {
    let mut buf = Vec::new();
    let mut style = CellStyle::default();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"b" => style.bold = font_toggle(e),
                b"i" => style.italic = font_toggle(e),
                b"u" => style.underline = font_toggle(e),
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"rPr" {
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    style
}

/// Text content of a `<t>` element up to `</t>`.
pub(crate) fn read_text<R: BufRead>(xml: &mut Reader<R>) -> String {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Text(ref e)) => {
                if let Ok(t) = e.unescape() {
                    text.push_str(&t);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Ok(t) = std::str::from_utf8(e.as_ref()) {
                    text.push_str(t);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    text
}
