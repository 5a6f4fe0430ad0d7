pub mod csv_loader;
pub mod json_loader;

pub use csv_loader::{load_mesas, read_code_column, write_extracted};
pub use json_loader::{load_json, save_json};
