//! Application Layer
//!
//! Use cases and the authorization guard.

pub mod config;
pub mod create_listing;
pub mod delete_listing;
pub mod edit_listing;
pub mod guard;
pub mod list_listings;
pub mod show_listing;
pub mod update_listing;

pub use config::ListingConfig;
pub use create_listing::{CreateListingInput, CreateListingUseCase};
pub use delete_listing::DeleteListingUseCase;
pub use edit_listing::EditListingOutput;
pub use guard::{
    AUTHENTICATED, Authorization, Authorizer, GuardContext, OWNER_ONLY, OwnershipGuard, PUBLIC,
    Requirement, authorize,
};
pub use list_listings::ListListingsUseCase;
pub use show_listing::ShowListingUseCase;
pub use update_listing::{UpdateListingInput, UpdateListingUseCase};
