//! Input validation done before anything is sent.

use std::fmt;

use uuid::Uuid;
use validator::ValidateEmail;

use crate::error::{ClientError, ClientResult};

/// A trimmed, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Normalise and check an address.
    ///
    /// Applies the same `validator` email rule the server uses, and also
    /// requires a dot inside the domain with text on both sides.
    pub fn parse(raw: &str) -> ClientResult<Self> {
        let email = raw.trim().to_lowercase();
        let invalid = || ClientError::Validation(format!("Invalid email: {raw}"));

        if !email.validate_email() {
            return Err(invalid());
        }
        let dotted = email.rsplit_once('@').is_some_and(|(_, domain)| {
            domain
                .rfind('.')
                .is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
        });
        if !dotted {
            return Err(invalid());
        }

        Ok(Self(email))
    }

    /// The normalised address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse a hyphenated UUID (8-4-4-4-12 hex digits, any case).
///
/// Stricter than [`Uuid::parse_str`], which also takes the simple, braced
/// and URN forms.
pub fn parse_uuid(raw: &str) -> ClientResult<Uuid> {
    let invalid = || ClientError::Validation(format!("Invalid UUID: {raw}"));

    let groups: Vec<&str> = raw.split('-').collect();
    let lengths = [8, 4, 4, 4, 12];
    let well_formed = groups.len() == lengths.len()
        && groups
            .iter()
            .zip(lengths)
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        return Err(invalid());
    }

    Uuid::parse_str(raw).map_err(|_| invalid())
}
