//! Tag catalog entity.

pub mod model;

pub use model::Tag;
