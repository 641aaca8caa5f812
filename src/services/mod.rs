//! External inputs
//!
//! Loading datasets from JSON, YAML and CSV files.

pub mod loader;

pub use loader::load_dataset;
