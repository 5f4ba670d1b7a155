//! # hungr-service
//!
//! Business logic for Hungr. Each service owns one use-case area and talks
//! to persistence only through the store traits in `hungr-database`, so the
//! same code runs against PostgreSQL and the in-memory store.
//!
//! Services are cheap to clone; dependencies are injected as `Arc`s at
//! construction time.

pub mod connection;
pub mod extraction;
pub mod file;
pub mod ingredient;
pub mod recipe;
pub mod step;
pub mod tag;
pub mod upload;
pub mod user;

pub use connection::ConnectionService;
pub use extraction::{ExtractionService, Extractor, OpenAiExtractor};
pub use file::{FileContent, FileService};
pub use recipe::{CreateRecipeInput, PublicRecipe, RecipeListing, RecipePatch, RecipeService};
pub use step::StepService;
pub use tag::TagService;
pub use upload::Upload;
pub use user::UserService;
