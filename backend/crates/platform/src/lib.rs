//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the feature crates:
//! - Cryptographic utilities (SHA-1, HMAC-SHA256, Base64)
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Browser-flow plumbing: flash notices, 303 redirects, JSON view envelopes
//!   and HTML-form method override

pub mod cookie;
pub mod crypto;
pub mod flash;
pub mod method_override;
pub mod password;
pub mod redirect;
pub mod view;
