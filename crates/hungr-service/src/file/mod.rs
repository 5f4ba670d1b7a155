//! Appending files to recipes and serving their bytes.

pub mod service;

pub use service::{FileContent, FileService};
