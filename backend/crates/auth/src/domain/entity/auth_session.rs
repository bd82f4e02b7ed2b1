//! Auth Session Entity
//!
//! Server-side session record; the cookie only carries its signed id.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entity::session_user::SessionUser;
use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: Uuid,
    pub user_id: UserId,
    /// Display name at login time, so resolving a session needs no user lookup
    pub user_name: String,
    /// Unix timestamp, milliseconds
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// TTL comes from `AuthConfig`
    pub fn new(user_id: UserId, user_name: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            user_name: user_name.into(),
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires_at_ms
    }

    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            user_id: self.user_id,
            user_name: self.user_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let session = AuthSession::new(UserId::new(), "alice", Duration::hours(1));
        let created = session.created_at;

        assert!(!session.is_expired());
        assert!(!session.is_expired_at(created + Duration::minutes(59)));
        assert!(session.is_expired_at(created + Duration::hours(1)));
    }
}
