//! # hungr-client
//!
//! Typed access to the Hungr HTTP API. Every call checks the status code,
//! validates the JSON shape with a guard from [`guards`] before decoding,
//! and reports failures as [`ClientError`].
//!
//! The crate also carries the small pieces of client state the web app
//! needs: the email [`Session`] and its cookie, browse-page tag filtering,
//! and step-editor canonicalisation.

pub mod browse;
pub mod client;
pub mod editor;
pub mod error;
pub mod guards;
pub mod session;
pub mod types;
pub mod validate;

pub use browse::{BrowseParams, filter_recipes, matches_tags};
pub use client::HungrClient;
pub use editor::{canonical_steps, join_ingredients, split_ingredients};
pub use error::{ClientError, ClientResult, FETCH_FAILURE_MESSAGE, friendly_error_message};
pub use session::Session;
pub use types::{
    ExtractedRecipe, FileUpload, PublicRecipe, RecipePatch, RecipesResponse, UploadResponse,
};
pub use validate::{Email, parse_uuid};
