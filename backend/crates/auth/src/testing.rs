//! In-memory repositories for tests (this crate and downstream crates
//! through the `test-support` feature)

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use kernel::error::app_error::{AppError, AppResult};
use uuid::Uuid;

use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::{user_id::UserId, user_name::UserName};

#[derive(Default)]
pub struct InMemoryAuthRepository {
    users: Mutex<HashMap<UserId, User>>,
    credentials: Mutex<HashMap<UserId, Credential>>,
    sessions: Mutex<HashMap<Uuid, AuthSession>>,
    fail_session_delete: AtomicBool,
    fail_credential_insert: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every session deletion fail with a 503
    pub fn fail_session_deletes(&self) {
        self.fail_session_delete.store(true, Ordering::SeqCst);
    }

    /// Make storing a credential fail with a 503, after the user row is staged
    pub fn fail_credential_inserts(&self) {
        self.fail_credential_insert.store(true, Ordering::SeqCst);
    }

    pub fn session_count(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn user_count(&self) -> usize {
        lock(&self.users).len()
    }

    /// Store a session as-is, e.g. one that is already expired
    pub fn insert_session(&self, session: AuthSession) {
        lock(&self.sessions).insert(session.session_id, session);
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User, credential: &Credential) -> AppResult<()> {
        let mut users = lock(&self.users);
        if users.values().any(|u| u.user_name == user.user_name) {
            return Err(AppError::conflict("Duplicate key value"));
        }
        // both rows are committed under the users lock, or neither is
        if self.fail_credential_insert.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("Database unavailable"));
        }
        lock(&self.credentials).insert(credential.user_id, credential.clone());
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AppResult<Option<User>> {
        Ok(lock(&self.users)
            .values()
            .find(|u| &u.user_name == user_name)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AppResult<bool> {
        Ok(lock(&self.users).values().any(|u| &u.user_name == user_name))
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        lock(&self.users).insert(user.user_id, user.clone());
        Ok(())
    }
}

impl CredentialRepository for InMemoryAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AppResult<Option<Credential>> {
        Ok(lock(&self.credentials).get(user_id).cloned())
    }
}

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AppResult<()> {
        lock(&self.sessions).insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<AuthSession>> {
        Ok(lock(&self.sessions).get(&session_id).cloned())
    }

    async fn delete(&self, session_id: Uuid) -> AppResult<()> {
        if self.fail_session_delete.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("Database unavailable"));
        }
        lock(&self.sessions).remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AppResult<u64> {
        let now = Utc::now();
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
