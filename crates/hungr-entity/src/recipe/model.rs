//! Recipe entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::file::{File, NewFile};
use crate::tag::Tag;

/// A named, tagged recipe owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    /// Recipe identifier.
    pub uuid: Uuid,
    /// Display name.
    pub name: String,
    /// Owning user.
    pub user_uuid: Uuid,
    /// Email of the owning user.
    pub owner_email: String,
    /// Comma-joined tag names, the display and filter string.
    pub tag_string: String,
    /// Free-text provenance (a URL, a cookbook page, ...).
    pub source: Option<String>,
    /// Whether the recipe can be read without a connection.
    pub is_public: bool,
    /// When the recipe was created.
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert a recipe with its files and tags at once.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Pre-assigned identifier; blob keys are derived from it.
    pub uuid: Uuid,
    /// Display name.
    pub name: String,
    /// Normalized email of the owner.
    pub owner_email: String,
    /// Normalized tag string.
    pub tag_string: String,
    /// Optional source.
    pub source: Option<String>,
    /// Files in page order; page numbers are assigned from 0.
    pub files: Vec<NewFile>,
    /// Catalog entries to upsert and link, already de-duplicated.
    pub tags: Vec<Tag>,
}

/// Partial update applied by PATCH.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    /// Replacement tag string and tag links, when tags are being edited.
    pub tags: Option<(String, Vec<Tag>)>,
    /// `Some(None)` clears the source, `None` leaves it alone.
    pub source: Option<Option<String>>,
    /// New visibility, if changing.
    pub is_public: Option<bool>,
}

/// Result of a successful recipe insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRecipe {
    /// The stored recipe.
    pub recipe: Recipe,
    /// Stored file records in page order.
    pub files: Vec<File>,
    /// Resolved catalog entries.
    pub tags: Vec<Tag>,
}
