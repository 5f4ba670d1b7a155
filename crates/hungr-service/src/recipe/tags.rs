//! Tag-string parsing.

use hungr_entity::Tag;

/// Separator used when storing a normalized tag string.
pub const TAG_SEPARATOR: &str = ", ";

/// A tag string split into catalog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTags {
    /// Names joined with `", "`, as stored on the recipe.
    pub tag_string: String,
    /// Distinct catalog entries in first-seen order.
    pub tags: Vec<Tag>,
}

/// Split on commas, trim, drop empties.
///
/// The stored string keeps repeats as typed; the link set does not.
pub fn parse_tag_string(raw: &str) -> ParsedTags {
    let names: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    let mut tags: Vec<Tag> = Vec::with_capacity(names.len());
    for name in &names {
        if !tags.iter().any(|t| t.name == *name) {
            tags.push(Tag::from_name(*name));
        }
    }

    ParsedTags {
        tag_string: names.join(TAG_SEPARATOR),
        tags,
    }
}
