//! Background workers for backend requests.

mod loader;

pub use loader::{fetch_image_worker, load_data_worker};
