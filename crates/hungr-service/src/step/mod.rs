//! Reading and replacing a recipe's step list.

pub mod service;

pub use service::{StepService, validate_steps};
