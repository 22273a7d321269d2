//! Session manager
//!
//! Wraps login, logout and the session-presence check used by the access
//! gate and the dashboard shell. Sessions are checked by presence only;
//! any authenticated principal is fully authorized for every admin
//! operation (no role model exists).

use std::sync::Arc;

use crate::models::{AuthUser, Session};
use crate::supabase::AuthClient;

/// Message shown when the login form is submitted with empty fields
pub const MSG_MISSING_CREDENTIALS: &str = "Email dan password wajib diisi!";

/// Message shown for any rejected login. Wrong password and unknown
/// account are deliberately indistinguishable.
pub const MSG_LOGIN_REJECTED: &str = "Login gagal. Periksa kembali email dan password Anda.";

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    /// Caught before any network call
    #[error("{0}")]
    Validation(String),

    /// The auth service rejected the login
    #[error("{0}")]
    Authentication(String),

    /// Logout or another session call failed
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Session manager over the hosted auth service
pub struct SessionService {
    auth: Arc<dyn AuthClient>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        Self { auth }
    }

    /// Establish a session from credentials.
    ///
    /// Empty fields fail before any network call. Every sign-in failure
    /// surfaces the same generic message; the underlying cause is only
    /// logged.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionServiceError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SessionServiceError::Validation(
                MSG_MISSING_CREDENTIALS.to_string(),
            ));
        }

        self.auth
            .sign_in_with_password(email, password)
            .await
            .map_err(|e| {
                tracing::warn!("Login rejected for {}: {}", email, e);
                SessionServiceError::Authentication(MSG_LOGIN_REJECTED.to_string())
            })
    }

    /// Terminate the session behind the given token
    pub async fn logout(&self, access_token: &str) -> Result<(), SessionServiceError> {
        self.auth
            .sign_out(access_token)
            .await
            .map_err(|e| SessionServiceError::Internal(format!("Gagal logout: {}", e)))
    }

    /// Resolve the principal behind the token, treating any auth-service
    /// failure as "no session" so callers fail closed.
    pub async fn current(&self, access_token: &str) -> Option<AuthUser> {
        match self.auth.get_session(access_token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Session check failed, treating as absent: {}", e);
                None
            }
        }
    }
}
