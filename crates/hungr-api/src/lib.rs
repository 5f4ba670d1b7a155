//! # hungr-api
//!
//! HTTP API layer for Hungr built on Axum.
//!
//! Provides the REST endpoints under `/api`, request-id logging and CORS
//! middleware, request extractors, DTOs, and the mapping from
//! [`hungr_core::error::AppError`] to `{"error": ...}` responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::serve;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
