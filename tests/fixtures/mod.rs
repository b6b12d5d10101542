//! Test fixtures for generating valid XLSX files in memory.
//!
//! Builders cover what the presenter reads: shared, inline and rich strings,
//! numbers and booleans, bold/italic/underline fonts, hyperlinks, column
//! widths, row heights and drawings with embedded images.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{Font, SheetBuilder, XlsxBuilder};
//!
//! let xlsx = XlsxBuilder::new()
//!     .sheet(
//!         SheetBuilder::new("Results")
//!             .styled("A1", "Client", Font::bold())
//!             .cell("B1", 42.0)
//!             .link("A2", "https://example.com", "Site"),
//!     )
//!     .build();
//!
//! let model = xlportal::model::WorkbookModel::load(&xlsx).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// 1x1 PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

// ============================================================================
// Cell values and fonts
// ============================================================================

/// Font toggles for a cell or rich text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Font {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Font {
    #[must_use]
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn underline() -> Self {
        Self {
            underline: true,
            ..Self::default()
        }
    }

    fn xml(self) -> String {
        let mut xml = String::new();
        if self.bold {
            xml.push_str("<b/>");
        }
        if self.italic {
            xml.push_str("<i/>");
        }
        if self.underline {
            xml.push_str("<u/>");
        }
        xml
    }
}

/// Value of a cell in the fixture.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A shared string (goes into sharedStrings.xml).
    String(String),
    /// A shared rich string made of runs.
    Rich(Vec<(String, Font)>),
    /// An inline string (not shared).
    InlineString(String),
    Number(f64),
    Boolean(bool),
    /// An error value (e.g., "#DIV/0!").
    Error(String),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

#[derive(Debug, Clone)]
pub struct CellEntry {
    pub cell_ref: String,
    pub value: CellValue,
    pub font: Option<Font>,
}

#[derive(Debug, Clone)]
pub struct LinkEntry {
    pub cell_ref: String,
    pub target: Option<String>,
    pub location: Option<String>,
}

/// Anchor marker: zero-based column and row plus EMU offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marker {
    pub col: u32,
    pub col_off: i64,
    pub row: u32,
    pub row_off: i64,
}

impl Marker {
    #[must_use]
    pub fn new(col: u32, col_off: i64, row: u32, row_off: i64) -> Self {
        Self {
            col,
            col_off,
            row,
            row_off,
        }
    }

    fn xml(self) -> String {
        format!(
            "<xdr:col>{}</xdr:col><xdr:colOff>{}</xdr:colOff><xdr:row>{}</xdr:row><xdr:rowOff>{}</xdr:rowOff>",
            self.col, self.col_off, self.row, self.row_off
        )
    }
}

#[derive(Debug, Clone)]
pub enum Anchor {
    TwoCell { from: Marker, to: Marker },
    OneCell { from: Marker, cx: i64, cy: i64 },
}

/// An image placed on a sheet.
#[derive(Debug, Clone)]
pub struct PictureEntry {
    pub name: String,
    /// File name under xl/media/; pictures sharing a file share the media part
    pub file_name: String,
    pub data: Vec<u8>,
    pub anchor: Anchor,
}

impl PictureEntry {
    #[must_use]
    pub fn two_cell(name: &str, from: Marker, to: Marker) -> Self {
        Self {
            name: name.to_string(),
            file_name: "image1.png".to_string(),
            data: TINY_PNG.to_vec(),
            anchor: Anchor::TwoCell { from, to },
        }
    }

    #[must_use]
    pub fn one_cell(name: &str, from: Marker, cx: i64, cy: i64) -> Self {
        Self {
            name: name.to_string(),
            file_name: "image1.png".to_string(),
            data: TINY_PNG.to_vec(),
            anchor: Anchor::OneCell { from, cx, cy },
        }
    }

    #[must_use]
    pub fn file(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }
}

// ============================================================================
// Sheet Builder
// ============================================================================

/// Builder for a single worksheet.
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    pub name: String,
    pub cells: Vec<CellEntry>,
    pub col_widths: Vec<(u32, u32, f64)>,
    pub row_heights: Vec<(u32, f64)>,
    pub default_col_width: Option<f64>,
    pub default_row_height: Option<f64>,
    pub links: Vec<LinkEntry>,
    pub pictures: Vec<PictureEntry>,
}

impl SheetBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Add an unstyled cell.
    #[must_use]
    pub fn cell<V: Into<CellValue>>(mut self, cell_ref: &str, value: V) -> Self {
        self.cells.push(CellEntry {
            cell_ref: cell_ref.to_string(),
            value: value.into(),
            font: None,
        });
        self
    }

    /// Add a cell whose style uses `font`.
    #[must_use]
    pub fn styled<V: Into<CellValue>>(mut self, cell_ref: &str, value: V, font: Font) -> Self {
        self.cells.push(CellEntry {
            cell_ref: cell_ref.to_string(),
            value: value.into(),
            font: Some(font),
        });
        self
    }

    /// Add a row of shared-string cells starting at column A.
    #[must_use]
    pub fn row(mut self, row: u32, values: &[&str]) -> Self {
        for (i, value) in values.iter().enumerate() {
            let cell_ref = format!("{}{row}", column_name(i as u32 + 1));
            self = self.cell(&cell_ref, *value);
        }
        self
    }

    /// Put `text` in the cell and link it externally.
    #[must_use]
    pub fn link(mut self, cell_ref: &str, url: &str, text: &str) -> Self {
        self = self.cell(cell_ref, text);
        self.links.push(LinkEntry {
            cell_ref: cell_ref.to_string(),
            target: Some(url.to_string()),
            location: None,
        });
        self
    }

    /// Link an existing cell to a place in the workbook.
    #[must_use]
    pub fn internal_link(mut self, cell_ref: &str, location: &str) -> Self {
        self.links.push(LinkEntry {
            cell_ref: cell_ref.to_string(),
            target: None,
            location: Some(location.to_string()),
        });
        self
    }

    #[must_use]
    pub fn col_width(mut self, min: u32, max: u32, width: f64) -> Self {
        self.col_widths.push((min, max, width));
        self
    }

    #[must_use]
    pub fn row_height(mut self, row: u32, height: f64) -> Self {
        self.row_heights.push((row, height));
        self
    }

    #[must_use]
    pub fn default_col_width(mut self, width: f64) -> Self {
        self.default_col_width = Some(width);
        self
    }

    #[must_use]
    pub fn default_row_height(mut self, height: f64) -> Self {
        self.default_row_height = Some(height);
        self
    }

    #[must_use]
    pub fn picture(mut self, picture: PictureEntry) -> Self {
        self.pictures.push(picture);
        self
    }
}

// ============================================================================
// XLSX Builder
// ============================================================================

/// Builder for creating complete XLSX files.
#[derive(Debug, Default)]
pub struct XlsxBuilder {
    sheets: Vec<SheetBuilder>,
}

impl XlsxBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sheet(mut self, sheet: SheetBuilder) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Build the XLSX file as bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut strings = SharedStrings::default();
        let mut fonts: Vec<Font> = Vec::new();
        for sheet in &self.sheets {
            for cell in &sheet.cells {
                strings.intern(&cell.value);
                if let Some(font) = cell.font {
                    if !fonts.contains(&font) {
                        fonts.push(font);
                    }
                }
            }
        }

        let mut write = |path: &str, body: &str| {
            zip.start_file(path, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };

        write("[Content_Types].xml", &content_types(&self.sheets));
        write("_rels/.rels", ROOT_RELS);
        write("xl/_rels/workbook.xml.rels", &workbook_rels(self.sheets.len()));
        write("xl/workbook.xml", &workbook_xml(&self.sheets));
        write("xl/styles.xml", &styles_xml(&fonts));
        if !strings.items.is_empty() {
            write("xl/sharedStrings.xml", &strings.xml());
        }

        let mut media: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        let mut drawing_no = 0;
        for (i, sheet) in self.sheets.iter().enumerate() {
            let n = i + 1;
            let drawing = if sheet.pictures.is_empty() {
                None
            } else {
                drawing_no += 1;
                Some(drawing_no)
            };
            write(
                &format!("xl/worksheets/sheet{n}.xml"),
                &sheet_xml(sheet, &strings, &fonts, drawing.is_some()),
            );

            let rels = sheet_rels(sheet, drawing);
            if let Some(rels) = rels {
                write(&format!("xl/worksheets/_rels/sheet{n}.xml.rels"), &rels);
            }

            if let Some(d) = drawing {
                write(&format!("xl/drawings/drawing{d}.xml"), &drawing_xml(&sheet.pictures));
                write(
                    &format!("xl/drawings/_rels/drawing{d}.xml.rels"),
                    &drawing_rels(&sheet.pictures),
                );
                for pic in &sheet.pictures {
                    media
                        .entry(pic.file_name.clone())
                        .or_insert_with(|| pic.data.clone());
                }
            }
        }

        for (name, data) in &media {
            zip.start_file(format!("xl/media/{name}"), options).unwrap();
            zip.write_all(data).unwrap();
        }

        let cursor = zip.finish().expect("Failed to finish ZIP");
        cursor.into_inner()
    }
}

/// A workbook with one sheet of shared-string rows.
#[must_use]
pub fn simple_workbook(name: &str, rows: &[&[&str]]) -> Vec<u8> {
    let mut sheet = SheetBuilder::new(name);
    for (i, values) in rows.iter().enumerate() {
        sheet = sheet.row(i as u32 + 1, values);
    }
    XlsxBuilder::new().sheet(sheet).build()
}

// ============================================================================
// Part generators
// ============================================================================

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[derive(Debug, Default)]
struct SharedStrings {
    items: Vec<CellValue>,
}

impl SharedStrings {
    fn intern(&mut self, value: &CellValue) {
        if matches!(value, CellValue::String(_) | CellValue::Rich(_)) && !self.items.contains(value)
        {
            self.items.push(value.clone());
        }
    }

    fn index_of(&self, value: &CellValue) -> usize {
        self.items.iter().position(|v| v == value).unwrap()
    }

    fn xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
            self.items.len()
        );
        for item in &self.items {
            match item {
                CellValue::String(s) => {
                    let _ = write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape(s));
                }
                CellValue::Rich(runs) => {
                    xml.push_str("<si>");
                    for (text, font) in runs {
                        let props = font.xml();
                        if props.is_empty() {
                            let _ = write!(xml, r#"<r><t xml:space="preserve">{}</t></r>"#, escape(text));
                        } else {
                            let _ = write!(
                                xml,
                                r#"<r><rPr>{props}<sz val="11"/></rPr><t xml:space="preserve">{}</t></r>"#,
                                escape(text)
                            );
                        }
                    }
                    xml.push_str("</si>");
                }
                _ => {}
            }
        }
        xml.push_str("</sst>");
        xml
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 1 -> "A", 27 -> "AA"
#[must_use]
pub fn column_name(mut col: u32) -> String {
    let mut name = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        name.push(char::from(b'A' + rem));
        col = (col - 1) / 26;
    }
    name.iter().rev().collect()
}

fn row_of(cell_ref: &str) -> u32 {
    cell_ref
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .unwrap()
}

fn col_of(cell_ref: &str) -> u32 {
    cell_ref
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .fold(0, |acc, c| acc * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1))
}

fn content_types(sheets: &[SheetBuilder]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    );
    for i in 1..=sheets.len() {
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        );
    }
    xml.push_str("</Types>");
    xml
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{i}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{REL_NS}/styles" Target="styles.xml"/><Relationship Id="rId{}" Type="{REL_NS}/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheet_count + 1,
        sheet_count + 2
    );
    xml.push_str("</Relationships>");
    xml
}

fn workbook_xml(sheets: &[SheetBuilder]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="{REL_NS}"><sheets>"#
    );
    for (i, sheet) in sheets.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(&sheet.name),
            i + 1,
            i + 1
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}

/// Font 0 is plain; cellXfs entry `n` uses font `n`.
fn styles_xml(fonts: &[Font]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="{}"><font><sz val="11"/><name val="Calibri"/></font>"#,
        fonts.len() + 1
    );
    for font in fonts {
        let _ = write!(xml, r#"<font>{}<sz val="11"/><name val="Calibri"/></font>"#, font.xml());
    }
    xml.push_str(r#"</fonts><fills count="1"><fill><patternFill patternType="none"/></fill></fills><borders count="1"><border/></borders>"#);
    let _ = write!(
        xml,
        r#"<cellXfs count="{}"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>"#,
        fonts.len() + 1
    );
    for i in 1..=fonts.len() {
        let _ = write!(
            xml,
            r#"<xf numFmtId="0" fontId="{i}" fillId="0" borderId="0" applyFont="1"/>"#
        );
    }
    xml.push_str("</cellXfs></styleSheet>");
    xml
}

fn cell_xml(cell: &CellEntry, strings: &SharedStrings, fonts: &[Font]) -> String {
    let style = cell
        .font
        .and_then(|f| fonts.iter().position(|x| *x == f))
        .map(|i| format!(r#" s="{}""#, i + 1))
        .unwrap_or_default();
    let r = &cell.cell_ref;
    match &cell.value {
        CellValue::String(_) | CellValue::Rich(_) => format!(
            r#"<c r="{r}"{style} t="s"><v>{}</v></c>"#,
            strings.index_of(&cell.value)
        ),
        CellValue::InlineString(s) => {
            format!(r#"<c r="{r}"{style} t="inlineStr"><is><t>{}</t></is></c>"#, escape(s))
        }
        CellValue::Number(n) => format!(r#"<c r="{r}"{style}><v>{n}</v></c>"#),
        CellValue::Boolean(b) => format!(r#"<c r="{r}"{style} t="b"><v>{}</v></c>"#, u8::from(*b)),
        CellValue::Error(e) => format!(r#"<c r="{r}"{style} t="e"><v>{}</v></c>"#, escape(e)),
    }
}

fn sheet_xml(sheet: &SheetBuilder, strings: &SharedStrings, fonts: &[Font], drawing: bool) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="{REL_NS}">"#
    );

    if sheet.default_col_width.is_some() || sheet.default_row_height.is_some() {
        xml.push_str("<sheetFormatPr");
        if let Some(w) = sheet.default_col_width {
            let _ = write!(xml, r#" defaultColWidth="{w}""#);
        }
        let _ = write!(
            xml,
            r#" defaultRowHeight="{}""#,
            sheet.default_row_height.unwrap_or(15.0)
        );
        xml.push_str("/>");
    }

    if !sheet.col_widths.is_empty() {
        xml.push_str("<cols>");
        for (min, max, width) in &sheet.col_widths {
            let _ = write!(
                xml,
                r#"<col min="{min}" max="{max}" width="{width}" customWidth="1"/>"#
            );
        }
        xml.push_str("</cols>");
    }

    let mut rows: BTreeMap<u32, Vec<&CellEntry>> = BTreeMap::new();
    for cell in &sheet.cells {
        rows.entry(row_of(&cell.cell_ref)).or_default().push(cell);
    }
    for (row, _) in &sheet.row_heights {
        rows.entry(*row).or_default();
    }

    xml.push_str("<sheetData>");
    for (row, mut cells) in rows {
        cells.sort_by_key(|c| col_of(&c.cell_ref));
        let height = sheet
            .row_heights
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, h)| format!(r#" ht="{h}" customHeight="1""#))
            .unwrap_or_default();
        let _ = write!(xml, r#"<row r="{row}"{height}>"#);
        for cell in cells {
            xml.push_str(&cell_xml(cell, strings, fonts));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");

    if !sheet.links.is_empty() {
        xml.push_str("<hyperlinks>");
        let mut external = 0;
        for link in &sheet.links {
            let _ = write!(xml, r#"<hyperlink ref="{}""#, link.cell_ref);
            if link.target.is_some() {
                external += 1;
                let _ = write!(xml, r#" r:id="rIdLink{external}""#);
            }
            if let Some(loc) = &link.location {
                let _ = write!(xml, r#" location="{}""#, escape(loc));
            }
            xml.push_str("/>");
        }
        xml.push_str("</hyperlinks>");
    }

    if drawing {
        xml.push_str(r#"<drawing r:id="rIdDrawing"/>"#);
    }
    xml.push_str("</worksheet>");
    xml
}

fn sheet_rels(sheet: &SheetBuilder, drawing: Option<usize>) -> Option<String> {
    let targets: Vec<&str> = sheet.links.iter().filter_map(|l| l.target.as_deref()).collect();
    if targets.is_empty() && drawing.is_none() {
        return None;
    }
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, target) in targets.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<Relationship Id="rIdLink{}" Type="{REL_NS}/hyperlink" Target="{}" TargetMode="External"/>"#,
            i + 1,
            escape(target)
        );
    }
    if let Some(d) = drawing {
        let _ = write!(
            xml,
            r#"<Relationship Id="rIdDrawing" Type="{REL_NS}/drawing" Target="../drawings/drawing{d}.xml"/>"#
        );
    }
    xml.push_str("</Relationships>");
    Some(xml)
}

fn drawing_xml(pictures: &[PictureEntry]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    for (i, pic) in pictures.iter().enumerate() {
        let (open, close, markers) = match pic.anchor {
            Anchor::TwoCell { from, to } => (
                "<xdr:twoCellAnchor>",
                "</xdr:twoCellAnchor>",
                format!(
                    "<xdr:from>{}</xdr:from><xdr:to>{}</xdr:to>",
                    from.xml(),
                    to.xml()
                ),
            ),
            Anchor::OneCell { from, cx, cy } => (
                "<xdr:oneCellAnchor>",
                "</xdr:oneCellAnchor>",
                format!(
                    r#"<xdr:from>{}</xdr:from><xdr:ext cx="{cx}" cy="{cy}"/>"#,
                    from.xml()
                ),
            ),
        };
        let _ = write!(
            xml,
            r#"{open}{markers}<xdr:pic><xdr:nvPicPr><xdr:cNvPr id="{id}" name="{name}"/><xdr:cNvPicPr/></xdr:nvPicPr><xdr:blipFill><a:blip r:embed="rIdImg{n}"/><a:stretch><a:fillRect/></a:stretch></xdr:blipFill><xdr:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="1" cy="1"/></a:xfrm><a:prstGeom prst="rect"/></xdr:spPr></xdr:pic><xdr:clientData/>{close}"#,
            id = i + 2,
            name = escape(&pic.name),
            n = i + 1,
        );
    }
    xml.push_str("</xdr:wsDr>");
    xml
}

fn drawing_rels(pictures: &[PictureEntry]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, pic) in pictures.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<Relationship Id="rIdImg{}" Type="{REL_NS}/image" Target="../media/{}"/>"#,
            i + 1,
            pic.file_name
        );
    }
    xml.push_str("</Relationships>");
    xml
}
