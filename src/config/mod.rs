//! Configuration: the `[make]` table and the files and variables it is read from

pub mod loader;
pub mod model;

pub use loader::{config_paths, find_config_files, load_config};
pub use model::*;
