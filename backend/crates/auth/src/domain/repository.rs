//! Repository Traits
//!
//! Persistence ports. The PostgreSQL implementation lives in `infra`, an
//! in-memory one in `testing`.

use kernel::error::app_error::AppResult;
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::value_object::{user_id::UserId, user_name::UserName};

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user together with their credential; either both rows land
    /// or neither does. A duplicate canonical user name is a `Conflict`.
    async fn create(&self, user: &User, credential: &Credential) -> AppResult<()>;

    async fn find_by_user_name(&self, user_name: &UserName) -> AppResult<Option<User>>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AppResult<bool>;

    async fn update(&self, user: &User) -> AppResult<()>;
}

#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Credential>>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AppResult<()>;

    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<AuthSession>>;

    /// Deleting an absent session is not an error
    async fn delete(&self, session_id: Uuid) -> AppResult<()>;

    /// Remove every expired session, returning how many were deleted
    async fn cleanup_expired(&self) -> AppResult<u64>;
}
