//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the `auth` and `listing` crates:
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Typed identifiers for users, listings and reviews
//!
//! Only things whose meaning is identical across every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
