//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (sign up, sign in, sign out, session check)
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - Form handlers, session middleware, router
//!
//! ## Features
//! - Username + password signup (logs the new user in) and login
//! - Server-side sessions referenced by an HMAC-signed cookie token
//! - Session resolution middleware exposing `Option<SessionUser>` to every route
//! - Saved redirect: login returns to the page that required authentication
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Unknown user and wrong password are indistinguishable to the client
//! - Expired sessions are deleted when seen and swept at startup

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use application::config::AuthConfig;
pub use domain::entity::session_user::SessionUser;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{CurrentUser, resolve_session};
pub use presentation::router::{auth_router, auth_router_generic};
