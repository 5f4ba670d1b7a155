//! In-process store used for development and tests.
//!
//! Mirrors the PostgreSQL schema closely enough that services behave the
//! same on either backend, including cascading deletes and the
//! owner-or-connected visibility rule.

pub mod store;

pub use store::MemoryStore;
