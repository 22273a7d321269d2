//! Session model
//!
//! Mirrors the token response of the hosted auth service's password grant.
//! The session is checked by presence only; no role or permission model
//! exists anywhere in the system.

use serde::{Deserialize, Serialize};

/// Authenticated principal as reported by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Opaque user identifier
    pub id: String,
    /// Login email, if the auth service exposes it
    #[serde(default)]
    pub email: Option<String>,
}

/// Active session established by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Bearer token presented on every store call
    pub access_token: String,
    /// Token type, always "bearer" in practice
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Token lifetime in seconds, used as the cookie max-age
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    /// Refresh token; held but never exercised (no automatic renewal)
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// The authenticated principal
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

fn default_expires_in() -> i64 {
    3600
}
