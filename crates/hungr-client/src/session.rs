//! The logged-in email and its cookie.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::{ClientError, ClientResult};
use crate::validate::Email;

/// Cookie holding the logged-in email.
pub const COOKIE_NAME: &str = "hungr_email";

/// One year, in seconds.
pub const COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

/// Who is logged in. Passed explicitly to whatever needs it; the cookie is
/// only the serialisation format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    email: Email,
}

impl Session {
    /// Start a session for `email`.
    pub fn new(email: Email) -> Self {
        Self { email }
    }

    /// The logged-in email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// `Set-Cookie` value persisting the session.
    pub fn to_cookie(&self) -> String {
        format!(
            "{COOKIE_NAME}={}; path=/; max-age={COOKIE_MAX_AGE}; SameSite=Lax",
            encode_component(self.email.as_str())
        )
    }

    /// `Set-Cookie` value ending the session.
    pub fn clear_cookie() -> String {
        format!("{COOKIE_NAME}=; path=/; max-age=0")
    }

    /// Restore a session from a `Cookie` header.
    ///
    /// `Ok(None)` when the cookie is absent or empty; an error when it is
    /// present but does not hold a valid email.
    pub fn from_cookie_header(header: &str) -> ClientResult<Option<Self>> {
        let Some(raw) = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .map(|(_, value)| value)
        else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let decoded = decode_component(raw)
            .ok_or_else(|| ClientError::Session(format!("malformed {COOKIE_NAME} cookie")))?;
        let email = Email::parse(&decoded)
            .map_err(|e| ClientError::Session(format!("invalid {COOKIE_NAME} cookie: {e}")))?;
        Ok(Some(Self::new(email)))
    }
}

/// Bytes left as-is in a URI component: ASCII alphanumerics and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

fn decode_component(value: &str) -> Option<String> {
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
