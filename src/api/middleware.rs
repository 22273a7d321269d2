//! API middleware
//!
//! Contains:
//! - Shared application state
//! - The API error envelope
//! - Session-token extraction (bearer header or cookie)
//! - The access gate for the admin path prefix

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::AuthUser;
use crate::services::{BeritaService, GaleriService, SessionService};

/// Cookie holding the access token of the hosted auth session
pub const SESSION_COOKIE: &str = "sb-access-token";

/// Public entry route; the gate redirects here when no session exists
pub const ENTRY_ROUTE: &str = "/";

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub berita_service: Arc<BeritaService>,
    pub galeri_service: Arc<GaleriService>,
    pub upload_config: Arc<crate::config::UploadConfig>,
}

/// Session threaded through gated requests
///
/// The gate resolves the session once per request and inserts it here;
/// handlers take it from the request instead of re-querying the auth
/// service.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub access_token: String,
    pub user: AuthUser,
}

impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Sesi tidak ditemukan"))
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Blob write failed before any row mutation
    pub fn upload_error(message: impl Into<String>) -> Self {
        Self::new("UPLOAD_ERROR", message)
    }

    /// Blob removal failed; the triggering delete was aborted
    pub fn storage_error(message: impl Into<String>) -> Self {
        Self::new("STORAGE_ERROR", message)
    }

    /// Row insert/update/delete failed at the table store
    pub fn store_error(message: impl Into<String>) -> Self {
        Self::new("STORE_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "UPLOAD_ERROR" | "STORAGE_ERROR" | "STORE_ERROR" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Extract the session access token from a request
pub fn extract_session_token(request: &Request) -> Option<String> {
    if let Some(auth_header) = request.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    token_from_cookie_header(request.headers().get(header::COOKIE))
}

/// Extract the session access token from a header map
/// (handlers outside the gate receive `HeaderMap`, not a full request)
pub fn token_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    token_from_cookie_header(headers.get(header::COOKIE))
}

fn token_from_cookie_header(value: Option<&axum::http::HeaderValue>) -> Option<String> {
    let cookie_str = value?.to_str().ok()?;
    let prefix = format!("{}=", SESSION_COOKIE);
    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(token) = cookie.strip_prefix(prefix.as_str()) {
            return Some(token.to_string());
        }
    }
    None
}

/// Access gate for the admin path prefix.
///
/// Presence-only check: an absent session redirects to the public entry
/// route; a present session passes through with the session inserted into
/// the request. A failing session check counts as absent (fail closed),
/// so transient auth-service errors never expose gated content.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_session_token(&request) else {
        return Redirect::temporary(ENTRY_ROUTE).into_response();
    };

    match state.session_service.current(&token).await {
        Some(user) => {
            request.extensions_mut().insert(CurrentSession {
                access_token: token,
                user,
            });
            next.run(request).await
        }
        None => Redirect::temporary(ENTRY_ROUTE).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};

    fn request_with_auth(token: &str) -> Request<Body> {
        Request::builder()
            .uri("/test")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    fn request_with_cookie(token: &str) -> Request<Body> {
        Request::builder()
            .uri("/test")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_session_token_from_bearer() {
        let request = request_with_auth("test-token-123");
        assert_eq!(
            extract_session_token(&request),
            Some("test-token-123".to_string())
        );
    }

    #[test]
    fn test_extract_session_token_from_cookie() {
        let request = request_with_cookie("test-token-456");
        assert_eq!(
            extract_session_token(&request),
            Some("test-token-456".to_string())
        );
    }

    #[test]
    fn test_extract_session_token_bearer_priority() {
        let request = Request::builder()
            .uri("/test")
            .header(header::AUTHORIZATION, "Bearer bearer-token")
            .header(header::COOKIE, format!("{}=cookie-token", SESSION_COOKIE))
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            extract_session_token(&request),
            Some("bearer-token".to_string())
        );
    }

    #[test]
    fn test_extract_session_token_none() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        assert!(extract_session_token(&request).is_none());
    }

    #[test]
    fn test_extract_session_token_ignores_other_cookies() {
        let request = Request::builder()
            .uri("/test")
            .header(header::COOKIE, "theme=dark; other=1")
            .body(Body::empty())
            .unwrap();
        assert!(extract_session_token(&request).is_none());
    }

    #[tokio::test]
    async fn test_current_session_extractor_reads_extension() {
        use axum::extract::FromRequestParts;

        let mut request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        request.extensions_mut().insert(CurrentSession {
            access_token: "tok-extractor".to_string(),
            user: AuthUser {
                id: "u-1".to_string(),
                email: None,
            },
        });
        let (mut parts, _) = request.into_parts();

        let session = CurrentSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(session.access_token, "tok-extractor");
    }

    #[tokio::test]
    async fn test_current_session_extractor_rejects_without_extension() {
        use axum::extract::FromRequestParts;

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();

        let error = CurrentSession::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(error.error.code, "UNAUTHORIZED");
    }

    #[test]
    fn test_api_error_unauthorized() {
        let error = ApiError::unauthorized("Test message");
        assert_eq!(error.error.code, "UNAUTHORIZED");
    }

    #[test]
    fn test_api_error_validation() {
        let error = ApiError::validation_error("Judul wajib diisi.");
        assert_eq!(error.error.code, "VALIDATION_ERROR");
        assert_eq!(error.error.message, "Judul wajib diisi.");
    }
}
