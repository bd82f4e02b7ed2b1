//! Password Hashing and Verification
//!
//! Clear-text passwords are NFKC-normalized, checked against a small policy
//! and hashed with Argon2id into a PHC string. An optional application-wide
//! pepper is appended to the password bytes before hashing.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Passwords rejected outright, compared case-insensitively
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "abcdefgh",
    "letmein1",
    "welcome1",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "trustno1",
    "wanderlust",
];

const KEYBOARD_RUNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Password cannot be blank")]
    Blank,

    #[error("Password contains invalid control characters")]
    ControlCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    Predictable,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear text password
// ============================================================================

/// A password as typed by the user. Zeroized on drop, never `Clone`,
/// redacted in `Debug`.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("tide-pool-42".to_string()).unwrap();
/// assert!(format!("{:?}", password).contains("REDACTED"));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize and enforce the signup policy.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let password = Self(raw.nfkc().collect());
        password.check_policy()?;
        Ok(password)
    }

    /// Normalize only. Login uses this so that a policy change never locks
    /// out an account whose stored hash predates it.
    pub fn new_unchecked(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let value = self.0.as_str();
        if value.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        // code points, not bytes
        let len = value.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }

        if value.chars().any(|c| c.is_control() && c != '\t') {
            return Err(PasswordPolicyError::ControlCharacter);
        }

        if is_predictable(value) {
            return Err(PasswordPolicyError::Predictable);
        }
        Ok(())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }

    /// Argon2id with default (OWASP) parameters and a fresh 16-byte salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            phc: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

// ============================================================================
// Hashed password
// ============================================================================

/// Argon2id hash in PHC string format, safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    phc: String,
}

impl HashedPassword {
    /// Parse a PHC string loaded from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { phc })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.phc
    }

    /// Constant-time verification. A malformed stored hash never verifies.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.phc) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

// ============================================================================
// Pattern checks
// ============================================================================

fn is_predictable(password: &str) -> bool {
    let lower = password.to_lowercase();

    if COMMON_PASSWORDS.contains(&lower.as_str()) {
        return true;
    }
    if KEYBOARD_RUNS.iter().any(|run| lower.contains(run)) {
        return true;
    }

    let mut chars = lower.chars();
    let first = chars.next();
    if chars.all(|c| Some(c) == first) {
        return true;
    }

    is_digit_run(&lower)
}

/// "12345678", "98765432", wrapping through 0
fn is_digit_run(s: &str) -> bool {
    let Some(digits) = s
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    ascending || descending
}
