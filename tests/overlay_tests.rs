//! Image overlay placement over measured and planned grids.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use std::collections::BTreeSet;

use fixtures::{Marker, PictureEntry, SheetBuilder, XlsxBuilder};
use xlportal::layout::{
    place_image, place_images, plan, MeasuredGrid, PixelRect, PlanGeometry,
};
use xlportal::model::WorkbookModel;
use xlportal::AnchorRange;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

/// Logo anchored from (row 2.0, col 1.5) to (row 6.5, col 4.0) on a 7x4 sheet.
fn model_with_logo() -> WorkbookModel {
    let bytes = XlsxBuilder::new()
        .sheet(
            SheetBuilder::new("Report")
                .cell("A1", "Header")
                .cell("D7", "end")
                .picture(PictureEntry::two_cell(
                    "Logo",
                    Marker::new(1, 320_000, 2, 0),
                    Marker::new(4, 0, 6, 90_000),
                )),
        )
        .build();
    WorkbookModel::load(&bytes).unwrap()
}

#[test]
fn measured_grid_placement() {
    let mut grid = MeasuredGrid::new();
    grid.insert(1, 1, PixelRect::new(0.0, 0.0, 30.0, 20.0));
    grid.insert(2, 3, PixelRect::new(70.0, 20.0, 30.0, 20.0));

    let placed = place_image(&AnchorRange::new(0.0, 0.0, 2.0, 3.0), &grid).unwrap();
    assert_eq!((placed.left, placed.top), (0.0, 0.0));
    assert_eq!((placed.width, placed.height), (100.0, 40.0));
    assert!(close(placed.scale_x, 33.333));
    assert!(close(placed.scale_y, 20.0));
}

#[test]
fn planned_grid_placement() {
    let model = model_with_logo();
    let plan = plan(&model, 0, &BTreeSet::new()).unwrap();
    let geometry = PlanGeometry::from_plan(&plan);

    let overlays = place_images(&model, "Report", &geometry, |image| {
        model.media(image).map(xlportal::EmbeddedImage::data_uri)
    });
    assert_eq!(overlays.len(), 1);

    let logo = &overlays[0];
    assert_eq!(logo.name.as_deref(), Some("Logo"));
    assert!(logo.src.starts_with("data:image/png;base64,"));

    // Top-left cell (3, 3) starts at 2 columns x 64px and 2 rows x 20px;
    // bottom-right cell (7, 4) ends at 4 x 64px and 7 x 20px.
    let p = logo.placement;
    assert_eq!((p.left, p.top), (128.0, 40.0));
    assert_eq!((p.width, p.height), (128.0, 100.0));
    assert!(close(p.scale_x, 51.2));
    assert!(close(p.scale_y, 22.222));
}

#[test]
fn hiding_the_anchor_column_drops_the_image() {
    let model = model_with_logo();
    let hidden: BTreeSet<u32> = [3].into_iter().collect();
    let plan = plan(&model, 0, &hidden).unwrap();
    let overlays = place_images(&model, "Report", &PlanGeometry::from_plan(&plan), |_| {
        Some("x.png".to_string())
    });
    assert!(overlays.is_empty());
}

#[test]
fn hiding_a_column_to_the_left_shifts_the_image() {
    let model = model_with_logo();
    let hidden: BTreeSet<u32> = [1].into_iter().collect();
    let plan = plan(&model, 0, &hidden).unwrap();
    let overlays = place_images(&model, "Report", &PlanGeometry::from_plan(&plan), |_| {
        Some("x.png".to_string())
    });
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].placement.left, 64.0);
}

#[test]
fn images_without_a_source_are_skipped() {
    let model = model_with_logo();
    let plan = plan(&model, 0, &BTreeSet::new()).unwrap();
    let overlays = place_images(&model, "Report", &PlanGeometry::from_plan(&plan), |_| None);
    assert!(overlays.is_empty());
}

#[test]
fn unrendered_rows_place_nothing() {
    let model = model_with_logo();
    // An empty grid stands in for a table that has not been laid out yet
    let overlays = place_images(&model, "Report", &MeasuredGrid::new(), |_| {
        Some("x.png".to_string())
    });
    assert!(overlays.is_empty());
}

#[test]
fn image_over_trailing_sized_rows_is_placed() {
    // Rows 3-6 carry no cells; row 6 only declares a height
    let bytes = XlsxBuilder::new()
        .sheet(
            SheetBuilder::new("Chart")
                .cell("A1", "Title")
                .cell("D2", "x")
                .row_height(6, 15.0)
                .picture(PictureEntry::two_cell(
                    "Trend",
                    Marker::new(0, 0, 2, 0),
                    Marker::new(2, 0, 5, 0),
                )),
        )
        .build();
    let model = WorkbookModel::load(&bytes).unwrap();
    let plan = plan(&model, 0, &BTreeSet::new()).unwrap();
    assert_eq!(plan.rows.len(), 6);

    let overlays = place_images(&model, "Chart", &PlanGeometry::from_plan(&plan), |_| {
        Some("trend.png".to_string())
    });
    assert_eq!(overlays.len(), 1);
    let p = overlays[0].placement;
    assert_eq!((p.left, p.top), (0.0, 40.0));
    assert_eq!((p.width, p.height), (128.0, 60.0));
    assert!(close(p.scale_x, 64.0));
    assert!(close(p.scale_y, 20.0));
}
