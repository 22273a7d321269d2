//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints for the kelola admin service.
//! It includes:
//! - Auth endpoints (login, per-surface logout, session presence)
//! - Berita (news) CRUD endpoints
//! - Galeri (gallery) CRUD endpoints
//! - The access gate that fronts every /admin route

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod berita;
pub mod common;
pub mod galeri;
pub mod middleware;

pub use middleware::{ApiError, AppState, CurrentSession};

/// Entry page served at `/`. Unauthenticated viewers of /admin land
/// here; the actual login form lives in the separate frontend.
const ENTRY_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"id\">\n<head><meta charset=\"utf-8\"><title>Login Admin</title></head>\n<body><h1>Login Admin</h1><p>POST /api/v1/auth/login</p></body>\n</html>\n";

async fn entry_page() -> Html<&'static str> {
    Html(ENTRY_PAGE)
}

/// Build the gated admin router
fn build_admin_router(state: AppState) -> Router<AppState> {
    // Allow the configured image size plus multipart framing overhead;
    // the handlers enforce the exact limit with their own message.
    let body_limit = DefaultBodyLimit::max(state.upload_config.max_file_size as usize + 64 * 1024);

    Router::new()
        .nest("/berita", berita::router())
        .nest("/galeri", galeri::router())
        .route("/logout", post(auth::logout_with_confirm))
        .layer(body_limit)
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_session,
        ))
}

/// Build the complete router with middleware.
///
/// Fails when the configured CORS origin is not a valid header value, so
/// a misconfiguration surfaces at startup instead of on the first
/// preflight.
pub fn build_router(
    state: AppState,
    cors_origin: &str,
) -> Result<Router, header::InvalidHeaderValue> {
    let origin = cors_origin.parse::<HeaderValue>()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(entry_page))
        .nest("/api/v1/auth", auth::router())
        .nest("/admin", build_admin_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
