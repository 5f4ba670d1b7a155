//! # hungr-storage
//!
//! Blob storage for recipe uploads. [`providers::LocalStorageProvider`]
//! keeps bytes on the local filesystem; [`StorageManager`] owns the key
//! layout so the rest of the application never builds paths itself.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
pub use providers::LocalStorageProvider;
