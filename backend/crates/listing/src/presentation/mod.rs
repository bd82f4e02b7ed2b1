//! Presentation Layer
//!
//! Multipart form parsing, handlers, router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ListingAppState;
pub use router::{listing_router, listing_router_generic};
