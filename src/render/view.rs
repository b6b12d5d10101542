//! One call from view state to sheet HTML.

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::layout::{place_images, plan_with_config, GridGeometry, PlanGeometry};
use crate::model::WorkbookModel;
use crate::types::SheetImage;
use crate::view::ViewState;

use super::HtmlRenderer;

/// Render the active sheet of `view`, with image overlays placed over `grid`.
///
/// Without a measured grid the overlays are placed on the plan's own size hints.
/// The current search match, if any, carries the highlight class.
pub fn render_view<F>(
    model: &WorkbookModel,
    view: &ViewState,
    config: &ViewerConfig,
    grid: Option<&dyn GridGeometry>,
    src_for: F,
) -> Result<String>
where
    F: FnMut(&SheetImage) -> Option<String>,
{
    let plan = plan_with_config(model, view.active_sheet(), view.hidden_columns(), config)?;
    let overlays = match grid {
        Some(grid) => place_images(model, &plan.sheet_name, grid, src_for),
        None => place_images(model, &plan.sheet_name, &PlanGeometry::from_plan(&plan), src_for),
    };
    let highlight = view.search_state().current().map(|m| (m.row, m.col));
    Ok(HtmlRenderer::new(config).render(&plan, &overlays, highlight))
}
