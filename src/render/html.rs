//! HTML table output for a render plan.
//!
//! Cells carry `data-row`/`data-col` with their sheet coordinates so a browser
//! can find them again for measuring and highlighting, whatever is hidden.

use std::fmt::Write as _;

use crate::config::ViewerConfig;
use crate::layout::{CellDescriptor, ImageOverlay, RenderPlan};

/// Minimal escaping for text and attribute content.
#[must_use]
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn px(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub struct HtmlRenderer<'a> {
    config: &'a ViewerConfig,
}

impl<'a> HtmlRenderer<'a> {
    #[must_use]
    pub fn new(config: &'a ViewerConfig) -> Self {
        Self { config }
    }

    /// The sheet container: table plus image overlays.
    ///
    /// `highlight` marks one cell (1-based row, col) with the highlight class.
    #[must_use]
    pub fn render(
        &self,
        plan: &RenderPlan,
        overlays: &[ImageOverlay],
        highlight: Option<(u32, u32)>,
    ) -> String {
        let mut out = String::with_capacity(plan.rows.len() * plan.columns.len() * 64 + 128);
        let _ = write!(
            out,
            r#"<div class="sheet-container" data-sheet="{}" style="position:relative">"#,
            html_escape(&plan.sheet_name)
        );
        let _ = write!(
            out,
            r#"<table class="{}"><tbody>"#,
            html_escape(&self.config.table_class)
        );

        for row in &plan.rows {
            let _ = write!(out, r#"<tr data-row="{}">"#, row.index);
            for cell in &row.cells {
                let highlighted = highlight == Some((row.index, cell.col));
                self.write_cell(&mut out, row.index, cell, highlighted);
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");

        out.push_str(&Self::render_overlays(overlays));
        out.push_str("</div>");
        out
    }

    /// Positioned `<img>` elements, for appending into a rendered sheet container.
    #[must_use]
    pub fn render_overlays(overlays: &[ImageOverlay]) -> String {
        let mut out = String::new();
        for overlay in overlays {
            let _ = write!(
                out,
                r#"<img src="{}" alt="{}" style="{}">"#,
                html_escape(&overlay.src),
                html_escape(overlay.name.as_deref().unwrap_or("Excel Image")),
                overlay.placement.css()
            );
        }
        out
    }

    fn write_cell(&self, out: &mut String, row: u32, cell: &CellDescriptor, highlighted: bool) {
        let mut class = html_escape(&self.config.cell_class);
        if highlighted {
            class.push(' ');
            class.push_str(&html_escape(&self.config.highlight_class));
        }

        let mut style = format!("width:{}px;height:{}px", px(cell.width_px), px(cell.height_px));
        if cell.style.bold {
            style.push_str(";font-weight:bold");
        }
        if cell.style.italic {
            style.push_str(";font-style:italic");
        }
        if cell.style.underline {
            style.push_str(";text-decoration:underline");
        }

        let _ = write!(
            out,
            r#"<td class="{class}" data-row="{row}" data-col="{}" style="{style}">"#,
            cell.col
        );
        let text = html_escape(&cell.text);
        match &cell.link {
            Some(url) => {
                let _ = write!(
                    out,
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{text}</a>"#,
                    html_escape(url)
                );
            }
            None => out.push_str(&text),
        }
        out.push_str("</td>");
    }

    /// A standalone page around [`Self::render`], with the styles the classes need.
    #[must_use]
    pub fn render_document(
        &self,
        plan: &RenderPlan,
        overlays: &[ImageOverlay],
        highlight: Option<(u32, u32)>,
    ) -> String {
        let table = html_escape(&self.config.table_class);
        let cell = html_escape(&self.config.cell_class);
        let hit = html_escape(&self.config.highlight_class);
        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>\n<style>\
             .{table}{{border-collapse:collapse;table-layout:fixed}}\
             .{cell}{{border:1px solid #d4d4d4;padding:0 4px;overflow:hidden;white-space:nowrap}}\
             .{hit}{{background-color:#fff59d}}\
             </style></head>\n<body>{body}</body></html>\n",
            title = html_escape(&plan.sheet_name),
            body = self.render(plan, overlays, highlight),
        )
    }
}
