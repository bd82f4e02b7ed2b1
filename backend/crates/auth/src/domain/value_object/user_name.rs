//! User Name Value Object
//!
//! The public handle used to log in and shown as listing owner and review
//! author.
//!
//! Processing order: NFKC normalization, trim, validation on the lowercase
//! canonical form. The case the user typed is kept for display.
//!
//! ## Invariants
//! - 3 to 30 characters
//! - only `a-z 0-9 _ . - +`
//! - starts and ends with a letter, digit or `_`
//! - no `..`
//! - not a reserved word

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+'];

/// Names that collide with routes or could impersonate staff
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "moderator",
    "staff",
    "support",
    "help",
    "api",
    "auth",
    "login",
    "logout",
    "signin",
    "signup",
    "register",
    "password",
    "user",
    "users",
    "account",
    "settings",
    "listing",
    "listings",
    "review",
    "reviews",
    "new",
    "edit",
    "null",
    "undefined",
    "anonymous",
    "guest",
    "wanderlust",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Username must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Username may only contain a-z, 0-9, _, ., -, + (found '{found}')")]
    InvalidCharacter { found: char },

    #[error("Username must start and end with a letter, digit or _")]
    InvalidBoundary,

    #[error("Username cannot contain consecutive dots")]
    ConsecutiveDots,

    #[error("'{0}' is a reserved username")]
    Reserved(String),
}

/// Validated, normalized user name
///
/// Equality and uniqueness use the canonical (lowercase) form.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from a stored value. Stored names were validated on insert,
    /// and a later policy change must not make existing rows unreadable.
    pub fn from_db(original: String) -> Self {
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// As typed, for display
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form, for lookups and uniqueness
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn validate(canonical: &str) -> Result<(), UserNameError> {
        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(found) = canonical.chars().find(|&c| !is_valid_char(c)) {
            return Err(UserNameError::InvalidCharacter { found });
        }

        let boundary_ok = canonical.chars().next().is_some_and(is_boundary_char)
            && canonical.chars().next_back().is_some_and(is_boundary_char);
        if !boundary_ok {
            return Err(UserNameError::InvalidBoundary);
        }

        if canonical.contains("..") {
            return Err(UserNameError::ConsecutiveDots);
        }

        if RESERVED_WORDS.contains(&canonical) {
            return Err(UserNameError::Reserved(canonical.to_string()));
        }

        Ok(())
    }
}

#[inline]
fn is_valid_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
}

#[inline]
fn is_boundary_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

impl PartialEq for UserName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for UserName {}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({})", self.original)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_and_keep_case() {
            let name = UserName::new("  AlIcE_123  ").unwrap();
            assert_eq!(name.original(), "AlIcE_123");
            assert_eq!(name.canonical(), "alice_123");
        }

        #[test]
        fn test_nfkc_fullwidth() {
            let name = UserName::new("Ａlice").unwrap();
            assert_eq!(name.canonical(), "alice");
        }

        #[test]
        fn test_case_insensitive_equality() {
            assert_eq!(UserName::new("Alice").unwrap(), UserName::new("alice").unwrap());
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_length() {
            assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
            assert_eq!(
                UserName::new("ab").unwrap_err(),
                UserNameError::TooShort { min: 3 }
            );
            assert_eq!(
                UserName::new("a".repeat(31)).unwrap_err(),
                UserNameError::TooLong { max: 30 }
            );
            assert!(UserName::new("a".repeat(30)).is_ok());
        }

        #[test]
        fn test_characters() {
            assert_eq!(
                UserName::new("bob smith").unwrap_err(),
                UserNameError::InvalidCharacter { found: ' ' }
            );
            assert_eq!(
                UserName::new("bob@home").unwrap_err(),
                UserNameError::InvalidCharacter { found: '@' }
            );
            assert!(UserName::new("bob.smith-2+x").is_ok());
        }

        #[test]
        fn test_boundaries_and_dots() {
            assert_eq!(
                UserName::new(".bob").unwrap_err(),
                UserNameError::InvalidBoundary
            );
            assert_eq!(
                UserName::new("bob-").unwrap_err(),
                UserNameError::InvalidBoundary
            );
            assert_eq!(
                UserName::new("bob..smith").unwrap_err(),
                UserNameError::ConsecutiveDots
            );
            assert!(UserName::new("_bob_").is_ok());
        }

        #[test]
        fn test_reserved() {
            assert_eq!(
                UserName::new("Listings").unwrap_err(),
                UserNameError::Reserved("listings".to_string())
            );
        }
    }

    #[test]
    fn test_from_db_skips_validation() {
        let name = UserName::from_db("Admin".to_string());
        assert_eq!(name.canonical(), "admin");
    }
}
