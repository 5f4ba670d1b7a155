//! Tag entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A globally shared tag. Names are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Identifier derived from the name.
    pub uuid: Uuid,
    /// Tag name as typed by the user, trimmed.
    pub name: String,
}

impl Tag {
    /// Build the catalog entry for a tag name.
    ///
    /// The identifier is a name-based UUIDv5, so the same name always maps
    /// to the same row no matter which recipe introduced it.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            uuid: Uuid::new_v5(&Uuid::NAMESPACE_DNS, name.as_bytes()),
            name,
        }
    }
}
