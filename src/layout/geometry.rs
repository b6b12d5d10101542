//! Pixel boxes of rendered cells.
//!
//! Overlay placement only needs to ask where a cell ended up. In a browser the
//! answer comes from measuring the DOM; elsewhere [`PlanGeometry`] derives it
//! from a plan's size hints.

use std::collections::HashMap;

use serde::Serialize;

use super::render_plan::RenderPlan;

/// A box relative to the grid's own origin.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Where a rendered cell sits. `None` means the cell was not rendered.
pub trait GridGeometry {
    /// Box of the cell at 1-based sheet row and column.
    fn cell_rect(&self, row: u32, col: u32) -> Option<PixelRect>;
}

/// Cumulative positions computed from a plan's width and height hints,
/// as a table with no borders or padding would lay it out.
#[derive(Debug, Clone, Default)]
pub struct PlanGeometry {
    /// sheet column -> (x, width)
    cols: HashMap<u32, (f64, f64)>,
    /// (y, height) per plan row; row index = position + 1
    rows: Vec<(f64, f64)>,
}

impl PlanGeometry {
    #[must_use]
    pub fn from_plan(plan: &RenderPlan) -> Self {
        let mut cols = HashMap::with_capacity(plan.columns.len());
        let mut x = 0.0;
        let widths = plan.rows.first().map(|r| &r.cells);
        for (pos, &col) in plan.columns.iter().enumerate() {
            let w = widths
                .and_then(|cells| cells.get(pos))
                .map_or(0.0, |c| c.width_px);
            cols.insert(col, (x, w));
            x += w;
        }

        let mut rows = Vec::with_capacity(plan.rows.len());
        let mut y = 0.0;
        for row in &plan.rows {
            rows.push((y, row.height_px));
            y += row.height_px;
        }

        Self { cols, rows }
    }
}

impl GridGeometry for PlanGeometry {
    fn cell_rect(&self, row: u32, col: u32) -> Option<PixelRect> {
        let i = usize::try_from(row.checked_sub(1)?).ok()?;
        let &(y, height) = self.rows.get(i)?;
        let &(x, width) = self.cols.get(&col)?;
        Some(PixelRect::new(x, y, width, height))
    }
}

/// Boxes reported by an external layout engine.
#[derive(Debug, Clone, Default)]
pub struct MeasuredGrid {
    cells: HashMap<(u32, u32), PixelRect>,
}

impl MeasuredGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: u32, col: u32, rect: PixelRect) {
        self.cells.insert((row, col), rect);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl GridGeometry for MeasuredGrid {
    fn cell_rect(&self, row: u32, col: u32) -> Option<PixelRect> {
        self.cells.get(&(row, col)).copied()
    }
}
