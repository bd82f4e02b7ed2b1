//! The authenticated principal attached to a request

use platform::view::ViewUser;
use serde::Serialize;

use crate::domain::value_object::user_id::UserId;

/// Who is signed in. Cheap to clone, carried in request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: UserId,
    pub user_name: String,
}

impl From<&SessionUser> for ViewUser {
    fn from(user: &SessionUser) -> Self {
        ViewUser {
            id: user.user_id,
            user_name: user.user_name.clone(),
        }
    }
}
