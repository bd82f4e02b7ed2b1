//! Sign Up Use Case
//!
//! Registers a user and logs them in.

use std::sync::Arc;

use kernel::error::kind::ErrorKind;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{credential::Credential, session_user::SessionUser, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
    /// Blank is treated as absent
    pub email: Option<String>,
}

pub struct SignUpOutput {
    pub session_token: String,
    pub user: SessionUser,
}

impl std::fmt::Debug for SignUpOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpOutput")
            .field("session_token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;

        let email = input
            .email
            .filter(|e| !e.trim().is_empty())
            .map(Email::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        let password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password_hash = UserPassword::from_raw(&password, self.config.pepper())?;

        let mut user = User::new(user_name, email);
        user.record_login();

        let credential = Credential::new(user.user_id, password_hash);

        // The unique index closes the race between the check above and this insert
        self.user_repo
            .create(&user, &credential)
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::Conflict {
                    AuthError::UserNameTaken
                } else {
                    AuthError::Infrastructure(e)
                }
            })?;

        let (session, session_token) =
            session_token::issue(self.session_repo.as_ref(), &self.config, &user).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed up"
        );

        Ok(SignUpOutput {
            session_token,
            user: session.session_user(),
        })
    }
}
