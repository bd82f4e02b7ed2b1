//! Session cookie token: `<session uuid>.<base64url HMAC-SHA256 of the uuid>`

use kernel::error::app_error::AppError;
use platform::crypto::{from_base64_url, hmac_sha256, hmac_sha256_verify, to_base64_url};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

pub fn sign(secret: &[u8; 32], session_id: Uuid) -> AuthResult<String> {
    let id = session_id.to_string();
    let tag = hmac_sha256(secret, id.as_bytes())
        .map_err(|_| AppError::internal("Invalid session secret"))?;
    Ok(format!("{}.{}", id, to_base64_url(&tag)))
}

/// `None` for anything malformed or forged
pub fn verify(secret: &[u8; 32], token: &str) -> Option<Uuid> {
    let (id, tag) = token.split_once('.')?;
    let tag = from_base64_url(tag).ok()?;
    if !hmac_sha256_verify(secret, id.as_bytes(), &tag) {
        return None;
    }
    id.parse().ok()
}

/// Persist a fresh session for `user` and return it with its cookie token
pub(crate) async fn issue<S>(
    session_repo: &S,
    config: &AuthConfig,
    user: &User,
) -> AuthResult<(AuthSession, String)>
where
    S: AuthSessionRepository,
{
    let session = AuthSession::new(
        user.user_id,
        user.user_name.original(),
        config.session_ttl_chrono(),
    );
    session_repo.create(&session).await?;
    let token = sign(&config.session_secret, session.session_id)?;
    Ok((session, token))
}
