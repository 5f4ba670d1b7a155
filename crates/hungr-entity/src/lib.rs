//! # hungr-entity
//!
//! Domain models for Hungr: users, recipes with their files and steps,
//! the global tag catalog, and directed connections between users.
//!
//! Models derive `sqlx::FromRow` so the PostgreSQL repositories can map
//! rows directly, and `serde` with the field names the HTTP API exposes.

pub mod connection;
pub mod recipe;
pub mod tag;
pub mod user;

pub use connection::{Connection, ConnectionDirection};
pub use recipe::{
    CreatedRecipe, File, FileBlob, NewFile, NewRecipe, Recipe, RecipeStep, RecipeUpdate,
};
pub use tag::Tag;
pub use user::{CreateUser, User};
