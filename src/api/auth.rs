//! Authentication API endpoints
//!
//! Handles HTTP requests for the session manager:
//! - POST /api/v1/auth/login - establish a session
//! - POST /api/v1/auth/logout - immediate logout (navbar surface)
//! - GET /api/v1/auth/session - presence check for the dashboard shell
//! - POST /admin/logout - arm-then-confirm logout (dashboard surface)
//!
//! The two logout surfaces deliberately behave differently; both are
//! reproduced per surface instead of unified.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{
    token_from_headers, ApiError, AppState, CurrentSession, SESSION_COOKIE,
};
use crate::models::AuthUser;
use crate::services::SessionServiceError;

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
    /// Where the client navigates next
    pub redirect_to: String,
}

/// Response for the authenticated principal
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Response for the session presence check
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// The authenticated principal, or null when no session exists
    pub session: Option<UserResponse>,
}

/// Request body for the dashboard-surface logout
#[derive(Debug, Deserialize)]
pub struct ConfirmLogoutRequest {
    /// First invocation arms (false), second executes (true)
    #[serde(default)]
    pub confirmed: bool,
}

/// Response when the dashboard logout was armed but not confirmed
#[derive(Debug, Serialize)]
pub struct ArmedLogoutResponse {
    pub armed: bool,
    pub message: String,
}

/// Build the public auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
}

fn session_cookie(token: &str, max_age: i64) -> HeaderMap {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    );
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    headers
}

fn clear_session_cookie() -> HeaderMap {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    headers
}

/// POST /api/v1/auth/login - establish a session
///
/// Missing fields are rejected before any network call with their own
/// message; a rejected login surfaces one generic message whatever the
/// cause.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .session_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            SessionServiceError::Validation(msg) => ApiError::validation_error(msg),
            SessionServiceError::Authentication(msg) => ApiError::unauthorized(msg),
            SessionServiceError::Internal(msg) => ApiError::internal_error(msg),
        })?;

    let headers = session_cookie(&session.access_token, session.expires_in);
    Ok((
        headers,
        Json(LoginResponse {
            access_token: session.access_token,
            user: session.user.into(),
            redirect_to: "/admin".to_string(),
        }),
    ))
}

/// POST /api/v1/auth/logout - immediate logout (navbar surface)
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = token_from_headers(&headers)
        .ok_or_else(|| ApiError::unauthorized("Sesi tidak ditemukan"))?;

    state
        .session_service
        .logout(&token)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::NO_CONTENT, clear_session_cookie()))
}

/// GET /api/v1/auth/session - presence check
///
/// Absent or failing sessions both report null; the dashboard shell
/// redirects unauthenticated viewers on that basis.
async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionResponse> {
    let user = match token_from_headers(&headers) {
        Some(token) => state.session_service.current(&token).await,
        None => None,
    };
    Json(SessionResponse {
        session: user.map(UserResponse::from),
    })
}

/// POST /admin/logout - dashboard-surface logout with arm-then-confirm
///
/// The unconfirmed first invocation arms and performs no side effect;
/// only the confirmed invocation terminates the session.
pub async fn logout_with_confirm(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(body): Json<ConfirmLogoutRequest>,
) -> Result<axum::response::Response, ApiError> {
    if !body.confirmed {
        return Ok(Json(ArmedLogoutResponse {
            armed: true,
            message: "Konfirmasi Logout".to_string(),
        })
        .into_response());
    }

    state
        .session_service
        .logout(&session.access_token)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::NO_CONTENT, clear_session_cookie()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_is_http_only() {
        let headers = session_cookie("tok-1", 3600);
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("sb-access-token=tok-1"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let headers = clear_session_cookie();
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }
}
