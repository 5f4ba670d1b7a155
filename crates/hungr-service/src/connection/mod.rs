//! Directed connections between users.

pub mod service;

pub use service::ConnectionService;
