//! HTML output for render plans.

mod html;
mod view;

pub use html::{html_escape, HtmlRenderer};
pub use view::render_view;
