//! Email address validation
//!
//! Shape check only: one `@`, non-empty local part, dotted domain.
//! Matching against stored rows is exact, so the address is kept as given
//! (after trimming surrounding whitespace).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use super::ValidationError;

/// Maximum length for email addresses (matches the `users.email` column)
const MAX_EMAIL_LEN: usize = 255;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex")
});

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email, validating its shape.
    ///
    /// # Example
    /// ```
    /// use lightbnb_server::models::Email;
    ///
    /// assert!(Email::new("tristanjacobs@gmail.com").is_ok());
    /// assert!(Email::new("not-an-email").is_err());
    /// assert!(Email::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain.tld",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_addresses() {
        assert!(Email::new("a@b.co").is_ok());
        assert!(Email::new("sebastianguerra@ymail.com").is_ok());
        assert!(Email::new("first.last+tag@example.org").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let email = Email::new("  x@example.com \n").unwrap();
        assert_eq!(email.as_str(), "x@example.com");
    }

    #[test]
    fn keeps_case() {
        let email = Email::new("Mixed@Example.com").unwrap();
        assert_eq!(email.as_str(), "Mixed@Example.com");
    }

    #[test]
    fn rejects_missing_at() {
        let err = Email::new("example.com").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_spaces() {
        let err = Email::new("john doe@example.com").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_empty() {
        let err = Email::new("  ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let local = "a".repeat(MAX_EMAIL_LEN - "@example.com".len());
        assert!(Email::new(&format!("{}@example.com", local)).is_ok());

        let local = "a".repeat(MAX_EMAIL_LEN);
        let err = Email::new(&format!("{}@example.com", local)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { .. }));
    }
}
