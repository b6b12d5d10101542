//! CLI tool for xlportal - renders one sheet of an XLSX file as HTML or JSON
//!
//! Usage:
//!   xlportal_cli <input.xlsx>                         # HTML page to stdout
//!   xlportal_cli <input.xlsx> -o out.html             # HTML page to file
//!   xlportal_cli <input.xlsx> --format json           # render plan as JSON
//!   xlportal_cli <input.xlsx> --sheet Totals --hide "2, 4" --search acme
//!   xlportal_cli <input.xlsx> --config viewer.json
//!
//! Set RUST_LOG=debug for parser and layout diagnostics.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use xlportal::layout::{place_images, plan_with_config, PlanGeometry};
use xlportal::model::WorkbookModel;
use xlportal::render::HtmlRenderer;
use xlportal::view::{parse_hidden_columns, ViewState};
use xlportal::ViewerConfig;

const USAGE: &str = "Usage: xlportal_cli <input.xlsx> [-o output] [--format html|json] \
                     [--sheet name|index] [--hide \"2, 4\"] [--search text] [--config viewer.json]";

#[derive(Default)]
struct Options {
    input: String,
    output: Option<String>,
    json: bool,
    sheet: Option<String>,
    hide: Option<String>,
    search: Option<String>,
    config: Option<String>,
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut opts = Options::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" => opts.output = Some(iter.next()?.clone()),
            "--format" => opts.json = iter.next()? == "json",
            "--sheet" => opts.sheet = Some(iter.next()?.clone()),
            "--hide" => opts.hide = Some(iter.next()?.clone()),
            "--search" => opts.search = Some(iter.next()?.clone()),
            "--config" => opts.config = Some(iter.next()?.clone()),
            _ if opts.input.is_empty() => opts.input = arg.clone(),
            _ => return None,
        }
    }
    (!opts.input.is_empty()).then_some(opts)
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(opts) = parse_args(&args) else {
        fail(USAGE);
    };

    let config = match &opts.config {
        Some(path) => ViewerConfig::from_path(path)
            .unwrap_or_else(|e| fail(format!("Error reading config {path}: {e}"))),
        None => ViewerConfig::default(),
    };

    let data = fs::read(&opts.input)
        .unwrap_or_else(|e| fail(format!("Error reading {}: {e}", opts.input)));
    let model = WorkbookModel::load(&data)
        .unwrap_or_else(|e| fail(format!("Error parsing XLSX: {e}")));

    let mut view = ViewState::new();
    if let Some(sheet) = &opts.sheet {
        let index = model
            .sheet_index(sheet)
            .or_else(|| sheet.parse().ok())
            .unwrap_or_else(|| fail(format!("No sheet named {sheet}")));
        view.set_active_sheet(&model, index)
            .unwrap_or_else(|e| fail(e));
    }
    if let Some(hide) = &opts.hide {
        view.set_hidden_columns(parse_hidden_columns(hide));
    }
    if let Some(query) = &opts.search {
        let count = view.search(&model, query).unwrap_or_else(|e| fail(e));
        eprintln!("{count} matches for '{query}'");
    }

    let plan = plan_with_config(&model, view.active_sheet(), view.hidden_columns(), &config)
        .unwrap_or_else(|e| fail(e));

    let rendered = if opts.json {
        serde_json::to_string_pretty(&plan)
            .unwrap_or_else(|e| fail(format!("Error serializing JSON: {e}")))
    } else {
        let geometry = PlanGeometry::from_plan(&plan);
        let overlays = place_images(&model, &plan.sheet_name, &geometry, |image| {
            model.media(image).map(|m| m.data_uri())
        });
        let highlight = view.search_state().current().map(|m| (m.row, m.col));
        HtmlRenderer::new(&config).render_document(&plan, &overlays, highlight)
    };

    match &opts.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered) {
                fail(format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(rendered.as_bytes()).unwrap();
            println!();
        }
    }
}
