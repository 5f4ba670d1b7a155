//! Recipe entity and the records that hang off it.

pub mod file;
pub mod model;
pub mod step;

pub use file::{File, FileBlob, NewFile};
pub use model::{CreatedRecipe, NewRecipe, Recipe, RecipeUpdate};
pub use step::RecipeStep;
