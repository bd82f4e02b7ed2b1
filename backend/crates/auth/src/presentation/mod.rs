//! Presentation Layer
//!
//! Form handlers, DTOs, router, and session middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{CurrentUser, resolve_session};
pub use router::{auth_router, auth_router_generic};
