//! # hungr-database
//!
//! Persistence for Hungr. Each aggregate has a store trait in [`store`];
//! [`repositories`] implements them on PostgreSQL and [`memory`] keeps the
//! same tables in process for development and tests. [`Stores`] picks one
//! from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use stores::Stores;
