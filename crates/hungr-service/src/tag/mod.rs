//! Global tag catalog.

pub mod service;

pub use service::TagService;
