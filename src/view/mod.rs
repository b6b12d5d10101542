//! Viewer-side state: active sheet, hidden columns, result presets and search.

mod presets;
mod search;
mod state;

pub use presets::{
    format_hidden_columns, parse_hidden_columns, preset_key, PresetCatalog, ResultPreset,
    ResultSetting,
};
pub use search::{search, SearchMatch, SearchState};
pub use state::ViewState;
