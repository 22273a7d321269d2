//! Berita (news) API endpoints
//!
//! Handles HTTP requests for the news collection behind the access gate:
//! - GET /admin/berita - list with optional title filter
//! - GET /admin/berita/{id} - single article for the edit form
//! - POST /admin/berita - create (multipart, image required)
//! - PUT /admin/berita/{id} - update (multipart, image optional)
//! - DELETE /admin/berita/{id} - two-step delete via ?confirm=true

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::read_content_form;
use crate::api::middleware::{ApiError, AppState, CurrentSession};
use crate::models::Berita;
use crate::services::{BeritaService, BeritaServiceError, CreateBeritaInput, UpdateBeritaInput};

/// A berita row as served to the dashboard, with the resolved public
/// image URL alongside the stored key
#[derive(Debug, Serialize)]
pub struct BeritaResponse {
    pub id: i64,
    pub judul: String,
    pub isi: String,
    pub gambar: String,
    pub image_url: String,
    pub created_at: String,
}

impl BeritaResponse {
    fn new(service: &BeritaService, row: Berita) -> Self {
        let image_url = service.image_url(&row.gambar);
        Self {
            id: row.id,
            judul: row.judul,
            isi: row.isi,
            gambar: row.gambar,
            image_url,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Response after a successful create or update, carrying the
/// navigation metadata the dashboard applies after showing the message
#[derive(Debug, Serialize)]
pub struct BeritaSavedResponse {
    pub message: String,
    pub redirect_to: String,
    /// How long the success message stays visible before navigating
    pub redirect_delay_ms: u64,
    pub berita: BeritaResponse,
}

/// Query parameters for listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Title substring filter, case-insensitive
    #[serde(default)]
    pub q: String,
}

/// Query parameters for deletion
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// The unarmed first call returns the confirmation prompt and
    /// performs no side effect
    #[serde(default)]
    pub confirm: bool,
}

/// Response for an unarmed delete request
#[derive(Debug, Serialize)]
pub struct ConfirmRequiredResponse {
    pub confirm_required: bool,
    pub message: String,
}

/// Build the berita router (mounted behind the access gate)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_berita).post(create_berita))
        .route(
            "/{id}",
            get(get_berita).put(update_berita).delete(delete_berita),
        )
}

fn map_error(e: BeritaServiceError) -> ApiError {
    match e {
        BeritaServiceError::Validation(msg) => ApiError::validation_error(msg),
        BeritaServiceError::NotFound(_) => ApiError::not_found(e.to_string()),
        BeritaServiceError::Upload(_) => ApiError::upload_error(e.to_string()),
        BeritaServiceError::RemoveImage(_) => ApiError::storage_error(e.to_string()),
        BeritaServiceError::Table(_) => ApiError::store_error(e.to_string()),
    }
}

/// GET /admin/berita - list articles newest-first
async fn list_berita(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BeritaResponse>>, ApiError> {
    let rows = state
        .berita_service
        .list(&session.access_token, &query.q)
        .await
        .map_err(map_error)?;

    let rows = rows
        .into_iter()
        .map(|row| BeritaResponse::new(&state.berita_service, row))
        .collect();
    Ok(Json(rows))
}

/// GET /admin/berita/{id} - single article
async fn get_berita(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<BeritaResponse>, ApiError> {
    let row = state
        .berita_service
        .get(&session.access_token, id)
        .await
        .map_err(map_error)?;
    Ok(Json(BeritaResponse::new(&state.berita_service, row)))
}

/// POST /admin/berita - create an article from a multipart form
async fn create_berita(
    State(state): State<AppState>,
    session: CurrentSession,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_content_form(multipart, &state.upload_config, "gambar").await?;

    let input = CreateBeritaInput {
        judul: form.text("judul").to_string(),
        isi: form.text("isi").to_string(),
        gambar: form.file,
    };

    let row = state
        .berita_service
        .create(&session.access_token, input)
        .await
        .map_err(map_error)?;

    Ok((
        StatusCode::CREATED,
        Json(BeritaSavedResponse {
            message: "✅ Berita berhasil ditambahkan!".to_string(),
            redirect_to: "/admin".to_string(),
            redirect_delay_ms: 1200,
            berita: BeritaResponse::new(&state.berita_service, row),
        }),
    ))
}

/// PUT /admin/berita/{id} - update an article; the image is replaced
/// only when a new file is part of the form
async fn update_berita(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<BeritaSavedResponse>, ApiError> {
    let form = read_content_form(multipart, &state.upload_config, "gambar").await?;

    let input = UpdateBeritaInput {
        judul: form.text("judul").to_string(),
        isi: form.text("isi").to_string(),
        gambar: form.file,
    };

    let row = state
        .berita_service
        .update(&session.access_token, id, input)
        .await
        .map_err(map_error)?;

    Ok(Json(BeritaSavedResponse {
        message: "✅ Berita berhasil diperbarui!".to_string(),
        redirect_to: "/admin".to_string(),
        redirect_delay_ms: 1200,
        berita: BeritaResponse::new(&state.berita_service, row),
    }))
}

/// DELETE /admin/berita/{id} - remove an article and its image
///
/// Without `?confirm=true` nothing is touched; the response carries the
/// confirmation prompt instead.
async fn delete_berita(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<axum::response::Response, ApiError> {
    if !query.confirm {
        return Ok(Json(ConfirmRequiredResponse {
            confirm_required: true,
            message: "Yakin ingin menghapus berita ini?".to_string(),
        })
        .into_response());
    }

    state
        .berita_service
        .delete(&session.access_token, id)
        .await
        .map_err(map_error)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
