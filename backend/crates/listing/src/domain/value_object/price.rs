//! Price Value Object
//!
//! Nightly price in whole currency units.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub fn new(amount: i64) -> AppResult<Self> {
        if amount < 0 {
            return Err(AppError::bad_request("Price cannot be negative"));
        }
        Ok(Self(amount))
    }

    /// Parse form input; surrounding whitespace is ignored
    pub fn parse(input: &str) -> AppResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request("Price is required"));
        }
        let amount = trimmed
            .parse::<i64>()
            .map_err(|_| AppError::bad_request("Price must be a whole number"))?;
        Self::new(amount)
    }

    pub fn amount(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
