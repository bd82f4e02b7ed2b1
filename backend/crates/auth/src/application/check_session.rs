//! Check Session Use Case
//!
//! Resolves a session cookie token to the signed-in user.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session_user::SessionUser;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// `Ok(None)` for a missing, forged, unknown or expired token.
    /// Expired sessions are deleted on sight.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<Option<SessionUser>> {
        let Some(session_id) =
            session_token.and_then(|t| session_token::verify(&self.config.session_secret, t))
        else {
            return Ok(None);
        };

        let Some(session) = self.session_repo.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(session.session_user()))
    }
}
