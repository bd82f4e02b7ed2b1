//! Authorization Guard
//!
//! Each route declares an ordered list of [`Requirement`]s. [`authorize`]
//! checks them in order, stops at the first failure, and reports what was
//! established as an [`Authorization`].
//!
//! ```text
//! PUBLIC       []                      -> Anonymous
//! AUTHENTICATED [Authenticated]        -> Authenticated(user)
//! OWNER_ONLY   [Authenticated, Owner]  -> Owner { user, listing }
//! ```

use std::sync::Arc;

use auth::SessionUser;
use axum::http::Method;
use kernel::error::app_error::AppError;
use kernel::id::ListingId;

use crate::domain::entity::listing::Listing;
use crate::domain::repository::ListingRepository;
use crate::error::{ListingError, ListingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A session must be present
    Authenticated,
    /// The session user must own the targeted listing
    Owner,
}

pub const PUBLIC: &[Requirement] = &[];
pub const AUTHENTICATED: &[Requirement] = &[Requirement::Authenticated];
pub const OWNER_ONLY: &[Requirement] = &[Requirement::Authenticated, Requirement::Owner];

/// What the guard chain established about the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Authorization {
    /// Nothing was required
    Anonymous,
    Authenticated(SessionUser),
    /// The listing was loaded to check ownership and is handed on
    Owner { user: SessionUser, listing: Listing },
}

impl Authorization {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Authorization::Anonymous => None,
            Authorization::Authenticated(user) | Authorization::Owner { user, .. } => Some(user),
        }
    }
}

/// The parts of a request the guard looks at
#[derive(Debug, Clone, Copy)]
pub struct GuardContext<'a> {
    pub method: &'a Method,
    /// Path and query as requested, saved for the post-login redirect
    pub path_and_query: &'a str,
    pub user: Option<&'a SessionUser>,
    pub listing_id: Option<&'a ListingId>,
}

impl GuardContext<'_> {
    /// Only a GET can be replayed after login
    fn return_to(&self) -> Option<String> {
        (self.method == Method::GET).then(|| self.path_and_query.to_string())
    }
}

#[trait_variant::make(Authorizer: Send)]
pub trait LocalAuthorizer {
    async fn require_authenticated(&self, ctx: &GuardContext<'_>) -> ListingResult<SessionUser>;

    async fn require_owner(
        &self,
        user: &SessionUser,
        listing_id: &ListingId,
    ) -> ListingResult<Listing>;
}

/// Run `chain` in order; the first failing requirement ends it
pub async fn authorize<A>(
    authorizer: &A,
    chain: &[Requirement],
    ctx: &GuardContext<'_>,
) -> ListingResult<Authorization>
where
    A: Authorizer + Sync,
{
    let mut user: Option<SessionUser> = None;
    let mut listing: Option<Listing> = None;

    for requirement in chain {
        match requirement {
            Requirement::Authenticated => {
                user = Some(authorizer.require_authenticated(ctx).await?);
            }
            Requirement::Owner => {
                let Some(current) = user.as_ref() else {
                    tracing::error!(?chain, "Owner requirement declared before Authenticated");
                    return Err(AppError::internal("Misconfigured guard chain").into());
                };
                let Some(listing_id) = ctx.listing_id else {
                    tracing::error!(?chain, "Owner requirement on a route without a listing id");
                    return Err(AppError::internal("Misconfigured guard chain").into());
                };
                listing = Some(authorizer.require_owner(current, listing_id).await?);
            }
        }
    }

    Ok(match (user, listing) {
        (Some(user), Some(listing)) => Authorization::Owner { user, listing },
        (Some(user), None) => Authorization::Authenticated(user),
        (None, _) => Authorization::Anonymous,
    })
}

/// Session check plus owner comparison against the listing store
pub struct OwnershipGuard<R> {
    repo: Arc<R>,
}

impl<R> OwnershipGuard<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> Authorizer for OwnershipGuard<R>
where
    R: ListingRepository + Send + Sync,
{
    async fn require_authenticated(&self, ctx: &GuardContext<'_>) -> ListingResult<SessionUser> {
        ctx.user.cloned().ok_or_else(|| ListingError::Unauthenticated {
            return_to: ctx.return_to(),
        })
    }

    async fn require_owner(
        &self,
        user: &SessionUser,
        listing_id: &ListingId,
    ) -> ListingResult<Listing> {
        let listing = self
            .repo
            .find_by_id(listing_id)
            .await?
            .ok_or(ListingError::NotFound)?;

        if !listing.is_owned_by(&user.user_id) {
            tracing::warn!(
                user_id = %user.user_id,
                listing_id = %listing_id,
                "Ownership check failed"
            );
            return Err(ListingError::Forbidden);
        }

        Ok(listing)
    }
}
