//! Email normalization.

use validator::ValidateEmail;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;

/// Trim and lowercase an email, rejecting blanks and malformed addresses.
pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation("email is required"));
    }
    if !email.validate_email() {
        return Err(AppError::validation("invalid email"));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(
            normalize_email("  Cook@Example.COM ").unwrap(),
            "cook@example.com"
        );
    }

    #[test]
    fn test_rejects_blank_and_malformed() {
        assert_eq!(normalize_email("   ").unwrap_err().message, "email is required");
        assert_eq!(normalize_email("not-an-email").unwrap_err().message, "invalid email");
    }
}
