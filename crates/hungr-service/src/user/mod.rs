//! User lookup, login-by-email and profile management.

pub mod email;
pub mod service;

pub use email::normalize_email;
pub use service::UserService;
