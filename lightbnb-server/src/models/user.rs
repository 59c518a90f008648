//! User input validation

use super::validation::bounded_text;
use super::{Email, ValidationError};

/// Maximum length for user names (matches the `users.name` column)
const MAX_NAME_LEN: usize = 255;

/// Maximum length for passwords (matches the `users.password` column)
const MAX_PASSWORD_LEN: usize = 255;

/// Validated display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 255 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "name", MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Password as supplied by the client.
///
/// Opaque to this layer: stored and compared as given, never trimmed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }

        if s.len() > MAX_PASSWORD_LEN {
            return Err(ValidationError::TooLong {
                field: "password",
                max: MAX_PASSWORD_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated user ready for insertion
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: Password,
}

impl NewUser {
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let name = UserName::new("  Devin Sanders ").unwrap();
        assert_eq!(name.as_str(), "Devin Sanders");
    }

    #[test]
    fn name_rejects_whitespace_only() {
        let err = UserName::new("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn password_kept_verbatim() {
        let pw = Password::new(" secret ").unwrap();
        assert_eq!(pw.as_str(), " secret ");
    }

    #[test]
    fn password_not_in_debug_output() {
        let pw = Password::new("hunter2").unwrap();
        assert!(!format!("{:?}", pw).contains("hunter2"));
    }

    #[test]
    fn new_user_validates_every_field() {
        assert!(NewUser::new("Kim", "kim@example.com", "pw").is_ok());
        assert!(matches!(
            NewUser::new("Kim", "kim", "pw").unwrap_err(),
            ValidationError::InvalidFormat { field: "email", .. }
        ));
        assert!(matches!(
            NewUser::new("", "kim@example.com", "pw").unwrap_err(),
            ValidationError::Empty { field: "name" }
        ));
    }

    #[test]
    fn password_rejects_empty() {
        assert!(matches!(
            Password::new("").unwrap_err(),
            ValidationError::Empty { field: "password" }
        ));
    }
}
