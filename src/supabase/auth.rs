//! Auth service client
//!
//! Wraps the hosted auth service's password-grant endpoints. The service
//! owns credential storage and session tokens; this client only exchanges
//! credentials for a session and checks token validity.

use async_trait::async_trait;
use reqwest::header;

use crate::models::{AuthUser, Session};

/// Error type for auth service calls
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The service rejected the credentials (wrong password, unknown
    /// account - the service does not distinguish the two)
    #[error("Credentials rejected")]
    Rejected,

    /// The service answered with an unexpected status
    #[error("Auth service error: {0}")]
    Service(String),

    /// The request never completed
    #[error("Auth transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the hosted auth/session service
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Exchange credentials for a session
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError>;

    /// Terminate the session behind the given token
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Resolve the principal behind the given token, if the token is valid
    async fn get_session(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;
}

/// GoTrue-convention HTTP implementation of [`AuthClient`]
pub struct GotrueAuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl GotrueAuthClient {
    pub fn new(http: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }
}

#[async_trait]
impl AuthClient for GotrueAuthClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url
            ))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        match response.status().as_u16() {
            200 => Ok(response.json::<Session>().await?),
            400 | 401 | 403 | 422 => Err(AuthError::Rejected),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Service(format!("{}: {}", status, body)))
            }
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::Service(format!("{}: {}", status, body)))
        }
    }

    async fn get_session(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await?;

        match response.status().as_u16() {
            200 => Ok(Some(response.json::<AuthUser>().await?)),
            // Invalid or expired token - the session is simply absent
            401 | 403 => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Service(format!("{}: {}", status, body)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GotrueAuthClient::new(
            reqwest::Client::new(),
            "https://example.supabase.co/",
            "anon",
        );
        assert_eq!(client.base_url, "https://example.supabase.co");
    }

    #[test]
    fn test_session_deserializes_password_grant_response() {
        let body = serde_json::json!({
            "access_token": "tok-abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "ref-xyz",
            "user": { "id": "u-1", "email": "admin@example.com" }
        });
        let session: Session = serde_json::from_value(body).unwrap();
        assert_eq!(session.access_token, "tok-abc");
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.email.as_deref(), Some("admin@example.com"));
    }

    #[test]
    fn test_session_defaults_for_sparse_response() {
        let body = serde_json::json!({
            "access_token": "tok",
            "user": { "id": "u-1" }
        });
        let session: Session = serde_json::from_value(body).unwrap();
        assert_eq!(session.token_type, "bearer");
        assert_eq!(session.expires_in, 3600);
        assert!(session.refresh_token.is_none());
        assert!(session.user.email.is_none());
    }
}
