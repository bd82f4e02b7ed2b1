//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. `RawPassword` is user input,
//! `UserPassword` is the stored Argon2id hash.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("tide-pool-42".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

/// Password as submitted in a form. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Signup: normalize and enforce the password policy
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| policy_error(&e))
    }

    /// Login: normalize only, the stored hash decides
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }
}

fn policy_error(err: &PasswordPolicyError) -> AppError {
    let action = match err {
        PasswordPolicyError::TooShort { .. } => "Please choose a longer password",
        PasswordPolicyError::TooLong { .. } => "Please choose a shorter password",
        PasswordPolicyError::Blank => "Please enter a password",
        PasswordPolicyError::ControlCharacter => "Please remove control characters",
        PasswordPolicyError::Predictable => "Please choose a less predictable password",
    };
    AppError::bad_request(err.to_string()).with_action(action)
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored password hash (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("Failed to hash password").with_source(e))
    }

    pub fn from_db(phc: String) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AppError::internal("Stored password hash is malformed").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_violation_is_bad_request_with_action() {
        let err = RawPassword::new("short".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.action(), Some("Please choose a longer password"));
    }

    #[test]
    fn test_login_password_skips_policy() {
        let stored = UserPassword::from_raw(&RawPassword::for_login("short".to_string()), None)
            .unwrap();
        assert!(stored.verify(&RawPassword::for_login("short".to_string()), None));
    }

    #[test]
    fn test_from_db_rejects_garbage() {
        assert_eq!(
            UserPassword::from_db("plaintext".to_string())
                .unwrap_err()
                .status_code(),
            500
        );
    }
}
