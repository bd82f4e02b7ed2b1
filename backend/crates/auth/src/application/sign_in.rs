//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session_user::SessionUser;
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

pub struct SignInOutput {
    pub session_token: String,
    pub user: SessionUser,
}

impl std::fmt::Debug for SignInOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInOutput")
            .field("session_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

pub struct SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, C, S> SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
            session_repo,
            config,
        }
    }

    /// Unknown user, malformed user name and wrong password all map to
    /// `InvalidCredentials`.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user_name =
            UserName::new(&input.user_name).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credential = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = RawPassword::for_login(input.password);
        if !credential
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        user.record_login();
        self.user_repo.update(&user).await?;

        let (session, session_token) =
            session_token::issue(self.session_repo.as_ref(), &self.config, &user).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            user: session.session_user(),
        })
    }
}
