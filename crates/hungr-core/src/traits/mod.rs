//! Core traits defined in `hungr-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
