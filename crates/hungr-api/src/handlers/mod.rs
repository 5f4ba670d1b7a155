//! HTTP request handlers organized by domain.

pub mod auth;
pub mod connection;
pub mod extract;
pub mod file;
pub mod health;
pub mod recipe;
pub mod step;
pub mod tag;
pub mod user;
