//! UI rendering modules.
//!
//! Contains the UI rendering logic split into separate modules:
//! - `top_bar`: Title, load status and refresh
//! - `main_view`: Central panel with load states, navigation and the grid
//! - `image_grid`: Two rows of channel crops plus the output column
//! - `side_panel`: Minimap, random sample and legend
//! - `statistics`: Backend stats strip

mod image_grid;
mod main_view;
mod side_panel;
mod statistics;
pub mod theme;
mod top_bar;
