//! Render planning, grid geometry and image overlay placement.

mod geometry;
mod overlay;
mod render_plan;

pub use geometry::{GridGeometry, MeasuredGrid, PixelRect, PlanGeometry};
pub use overlay::{anchor_cells, place_image, place_images, ImageOverlay, OverlayPlacement};
pub use render_plan::{plan, plan_with_config, CellDescriptor, RenderPlan, RowPlan};
