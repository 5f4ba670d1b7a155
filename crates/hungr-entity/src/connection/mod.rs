//! Connections between users.

pub mod direction;
pub mod model;

pub use direction::ConnectionDirection;
pub use model::Connection;
