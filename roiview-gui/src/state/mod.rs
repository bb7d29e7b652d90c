//! Application state modules.

mod images;
mod ui;

pub use images::CellImages;
pub use ui::UiState;
