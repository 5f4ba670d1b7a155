//! Recipe creation, listing, editing and deletion.

pub mod service;
pub mod tags;

pub use service::{CreateRecipeInput, PublicRecipe, RecipeListing, RecipePatch, RecipeService};
pub use tags::{ParsedTags, parse_tag_string};
