//! Form payloads and view data

use serde::{Deserialize, Serialize};

/// `POST /signup` (urlencoded)
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// `POST /login` (urlencoded)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Data for the signup and login form views
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFormView {
    pub action: &'static str,
}
