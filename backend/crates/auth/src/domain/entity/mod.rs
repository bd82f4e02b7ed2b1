pub mod auth_session;
pub mod credential;
pub mod session_user;
pub mod user;
