//! Data types for the workbook model.

mod cell;
mod drawing;
mod rich_text;
mod style;
mod workbook;

pub use cell::*;
pub use drawing::*;
pub use rich_text::*;
pub use style::*;
pub use workbook::*;
