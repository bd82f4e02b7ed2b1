//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Option<Email>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: UserName, email: Option<Email>) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}
