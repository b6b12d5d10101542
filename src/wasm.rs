//! Browser binding.
//!
//! `PortalViewer` holds a loaded workbook and its view state. `renderHtml`
//! works anywhere; on wasm32 the viewer can also attach to a container element,
//! render into it, place images over the measured table and scroll search
//! matches into view.

use std::collections::{BTreeMap, HashMap};

use wasm_bindgen::prelude::*;

use crate::config::ViewerConfig;
use crate::layout::plan_with_config;
use crate::model::WorkbookModel;
use crate::render::render_view;
use crate::types::SheetImage;
use crate::view::{ResultSetting, ViewState};

#[cfg(target_arch = "wasm32")]
use crate::layout::{place_images, MeasuredGrid, PixelRect};
#[cfg(target_arch = "wasm32")]
use crate::render::HtmlRenderer;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, ScrollIntoViewOptions, ScrollLogicalPosition};

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn no_workbook() -> JsValue {
    JsValue::from_str("no workbook loaded")
}

#[wasm_bindgen]
pub struct PortalViewer {
    config: ViewerConfig,
    model: Option<WorkbookModel>,
    view: ViewState,
    /// Overrides for image sources by media index; data URIs otherwise
    image_urls: HashMap<usize, String>,
    #[cfg(target_arch = "wasm32")]
    container: Option<Element>,
}

impl PortalViewer {
    fn model(&self) -> Result<&WorkbookModel, JsValue> {
        self.model.as_ref().ok_or_else(no_workbook)
    }

    fn image_src(&self, model: &WorkbookModel, image: &SheetImage) -> Option<String> {
        self.image_urls
            .get(&image.media)
            .cloned()
            .or_else(|| model.media(image).map(crate::types::EmbeddedImage::data_uri))
    }
}

#[wasm_bindgen]
impl PortalViewer {
    /// Create a viewer. `config_json` is a `ViewerConfig` document; defaults apply when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PortalViewer, JsValue> {
        console_error_panic_hook::set_once();
        let config = match config_json {
            Some(json) => ViewerConfig::from_json_str(&json)?,
            None => ViewerConfig::default(),
        };
        Ok(Self {
            config,
            model: None,
            view: ViewState::new(),
            image_urls: HashMap::new(),
            #[cfg(target_arch = "wasm32")]
            container: None,
        })
    }

    /// Load an XLSX file from bytes. On failure the previous workbook stays.
    pub fn load(&mut self, data: &[u8]) -> Result<(), JsValue> {
        let model = WorkbookModel::load(data)?;
        self.model = Some(model);
        self.image_urls.clear();
        self.view.reset();
        Ok(())
    }

    #[wasm_bindgen(js_name = "sheetNames")]
    pub fn sheet_names(&self) -> Vec<String> {
        self.model
            .as_ref()
            .map(|m| m.sheet_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = "activeSheet")]
    pub fn active_sheet(&self) -> usize {
        self.view.active_sheet()
    }

    #[wasm_bindgen(js_name = "setActiveSheet")]
    pub fn set_active_sheet(&mut self, index: usize) -> Result<(), JsValue> {
        let model = self.model.as_ref().ok_or_else(no_workbook)?;
        self.view.set_active_sheet(model, index)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = "hiddenColumns")]
    pub fn hidden_columns(&self) -> Vec<u32> {
        self.view.hidden_columns().iter().copied().collect()
    }

    #[wasm_bindgen(js_name = "setHiddenColumns")]
    pub fn set_hidden_columns(&mut self, columns: Vec<u32>) {
        self.view.set_hidden_columns(columns);
    }

    /// Use a published URL instead of a data URI for one media entry.
    #[wasm_bindgen(js_name = "setImageUrl")]
    pub fn set_image_url(&mut self, media: usize, url: String) {
        self.image_urls.insert(media, url);
    }

    /// Replace the preset catalog from a `{key: {sheetName, hiddenColumns}}` object.
    #[wasm_bindgen(js_name = "loadResultSettings")]
    pub fn load_result_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: BTreeMap<String, ResultSetting> = serde_wasm_bindgen::from_value(settings)?;
        *self.view.presets_mut() = crate::view::PresetCatalog::from_settings(&settings);
        Ok(())
    }

    #[wasm_bindgen(js_name = "resultSettings")]
    pub fn result_settings(&self) -> Result<JsValue, JsValue> {
        to_js(&self.view.presets().to_settings())
    }

    #[wasm_bindgen(js_name = "addResultPreset")]
    pub fn add_result_preset(&mut self, target_sheet: &str, hidden_columns: Vec<u32>) -> String {
        self.view.add_result_preset(target_sheet, hidden_columns)
    }

    /// Returns false for an unknown key.
    #[wasm_bindgen(js_name = "applyResultPreset")]
    pub fn apply_result_preset(&mut self, key: &str) -> Result<bool, JsValue> {
        let model = self.model.as_ref().ok_or_else(no_workbook)?;
        Ok(self.view.apply_result_preset(model, key)?.is_some())
    }

    /// Search the active sheet; returns the match count.
    pub fn search(&mut self, query: &str) -> Result<usize, JsValue> {
        let model = self.model.as_ref().ok_or_else(no_workbook)?;
        Ok(self.view.search(model, query)?)
    }

    #[wasm_bindgen(js_name = "clearSearch")]
    pub fn clear_search(&mut self) {
        self.view.clear_search();
    }

    /// Advance to the next match; returns `{row, col, text}` or `undefined`.
    #[wasm_bindgen(js_name = "nextMatch")]
    pub fn next_match(&mut self) -> Result<JsValue, JsValue> {
        let current = self.view.next_match().cloned();
        self.after_navigation();
        to_js(&current)
    }

    #[wasm_bindgen(js_name = "previousMatch")]
    pub fn previous_match(&mut self) -> Result<JsValue, JsValue> {
        let current = self.view.previous_match().cloned();
        self.after_navigation();
        to_js(&current)
    }

    /// `"i/n"`, or `"0/0"` with no matches.
    #[wasm_bindgen(js_name = "searchPosition")]
    pub fn search_position(&self) -> String {
        self.view.search_state().position_label()
    }

    #[wasm_bindgen(js_name = "renderPlan")]
    pub fn render_plan(&self) -> Result<JsValue, JsValue> {
        let model = self.model()?;
        let plan = plan_with_config(
            model,
            self.view.active_sheet(),
            self.view.hidden_columns(),
            &self.config,
        )?;
        to_js(&plan)
    }

    /// Sheet HTML with images placed on the plan's size hints.
    #[wasm_bindgen(js_name = "renderHtml")]
    pub fn render_html(&self) -> Result<String, JsValue> {
        let model = self.model()?;
        Ok(render_view(model, &self.view, &self.config, None, |image| {
            self.image_src(model, image)
        })?)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PortalViewer {
    fn after_navigation(&self) {}
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl PortalViewer {
    /// Element that `render` writes into.
    pub fn attach(&mut self, container: Element) {
        self.container = Some(container);
    }

    /// Render the table into the attached container, then overlay images on
    /// the laid-out cells.
    pub fn render(&self) -> Result<(), JsValue> {
        let container = self
            .container
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no container attached"))?;
        let model = self.model()?;

        let empty = MeasuredGrid::new();
        container.set_inner_html(&render_view(
            model,
            &self.view,
            &self.config,
            Some(&empty),
            |_| None,
        )?);

        let Some(sheet_el) = container.query_selector(".sheet-container")? else {
            return Ok(());
        };
        let grid = measure_cells(&sheet_el)?;
        let sheet_name = model.sheet(self.view.active_sheet())?.name.clone();
        let overlays = place_images(model, &sheet_name, &grid, |image| {
            self.image_src(model, image)
        });
        if !overlays.is_empty() {
            sheet_el.insert_adjacent_html("beforeend", &HtmlRenderer::render_overlays(&overlays))?;
        }
        self.after_navigation();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl PortalViewer {
    fn after_navigation(&self) {
        let Some(container) = &self.container else {
            return;
        };
        let current = self.view.search_state().current().map(|m| (m.row, m.col));
        if let Err(e) = highlight_match(container, &self.config.highlight_class, current) {
            web_sys::console::warn_1(&e);
        }
    }
}

/// Cell boxes relative to the sheet container, keyed by sheet coordinates.
#[cfg(target_arch = "wasm32")]
fn measure_cells(sheet_el: &Element) -> Result<MeasuredGrid, JsValue> {
    let base = sheet_el.get_bounding_client_rect();
    let cells = sheet_el.query_selector_all("[data-row][data-col]")?;
    let mut grid = MeasuredGrid::new();
    for i in 0..cells.length() {
        let Some(el) = cells.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let coord = |name: &str| el.get_attribute(name).and_then(|v| v.parse::<u32>().ok());
        let (Some(row), Some(col)) = (coord("data-row"), coord("data-col")) else {
            continue;
        };
        let rect = el.get_bounding_client_rect();
        grid.insert(
            row,
            col,
            PixelRect::new(
                rect.left() - base.left(),
                rect.top() - base.top(),
                rect.width(),
                rect.height(),
            ),
        );
    }
    Ok(grid)
}

/// Move the highlight class to the cell at `current` and scroll it to the middle of the view.
#[cfg(target_arch = "wasm32")]
fn highlight_match(
    container: &Element,
    class: &str,
    current: Option<(u32, u32)>,
) -> Result<(), JsValue> {
    let previous = container.query_selector_all(&format!(".{class}"))?;
    for i in 0..previous.length() {
        if let Some(el) = previous.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            el.class_list().remove_1(class)?;
        }
    }

    let Some((row, col)) = current else {
        return Ok(());
    };
    let selector = format!(r#"[data-row="{row}"][data-col="{col}"]"#);
    let Some(cell) = container.query_selector(&selector)? else {
        // Hidden column
        return Ok(());
    };
    cell.class_list().add_1(class)?;
    let options = ScrollIntoViewOptions::new();
    options.set_block(ScrollLogicalPosition::Center);
    cell.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

/// Library version.
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
