//! # hungr-core
//!
//! Core crate for Hungr. Contains the unified error type, configuration
//! schemas, and the storage trait implemented by `hungr-storage`.
//!
//! This crate has **no** internal dependencies on other Hungr crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
