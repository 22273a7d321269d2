//! Galeri (gallery) API endpoints
//!
//! Handles HTTP requests for the gallery collection behind the access
//! gate. Mirrors the berita surface with two deliberate differences:
//! the only text field is the title, and a successful save navigates
//! back to /admin/galeri immediately instead of pausing on a message.

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
use crate::models::Galeri;
use crate::services::{CreateGaleriInput, GaleriService, GaleriServiceError, UpdateGaleriInput};

/// A galeri row as served to the dashboard
#[derive(Debug, Serialize)]
pub struct GaleriResponse {
    pub id: i64,
    pub judul: Option<String>,
    pub gambar: String,
    pub image_url: String,
    pub created_at: String,
}

impl GaleriResponse {
    fn new(service: &GaleriService, row: Galeri) -> Self {
        let image_url = service.image_url(&row.gambar);
        Self {
            id: row.id,
            judul: row.judul,
            gambar: row.gambar,
            image_url,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Response after a successful create or update
#[derive(Debug, Serialize)]
pub struct GaleriSavedResponse {
    pub message: String,
    pub redirect_to: String,
    pub redirect_delay_ms: u64,
    pub galeri: GaleriResponse,
}

/// Query parameters for listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
}

/// Query parameters for deletion
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Response for an unarmed delete request; the prompt names the item by
/// its title
#[derive(Debug, Serialize)]
pub struct ConfirmRequiredResponse {
    pub confirm_required: bool,
    pub message: String,
}

/// Build the galeri router (mounted behind the access gate)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_galeri).post(create_galeri))
        .route(
            "/{id}",
            get(get_galeri).put(update_galeri).delete(delete_galeri),
        )
}

fn map_error(e: GaleriServiceError) -> ApiError {
    match e {
        GaleriServiceError::Validation(msg) => ApiError::validation_error(msg),
        GaleriServiceError::NotFound(_) => ApiError::not_found(e.to_string()),
        GaleriServiceError::Upload(_) => ApiError::upload_error(e.to_string()),
        GaleriServiceError::RemoveImage(_) => ApiError::storage_error(e.to_string()),
        GaleriServiceError::Table(_) => ApiError::store_error(e.to_string()),
    }
}

/// GET /admin/galeri - list items newest-first
async fn list_galeri(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<GaleriResponse>>, ApiError> {
    let rows = state
        .galeri_service
        .list(&session.access_token, &query.q)
        .await
        .map_err(map_error)?;

    let rows = rows
        .into_iter()
        .map(|row| GaleriResponse::new(&state.galeri_service, row))
        .collect();
    Ok(Json(rows))
}

/// GET /admin/galeri/{id} - single item
async fn get_galeri(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<GaleriResponse>, ApiError> {
    let row = state
        .galeri_service
        .get(&session.access_token, id)
        .await
        .map_err(map_error)?;
    Ok(Json(GaleriResponse::new(&state.galeri_service, row)))
}

/// POST /admin/galeri - create an item from a multipart form
async fn create_galeri(
    State(state): State<AppState>,
    session: CurrentSession,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_content_form(multipart, &state.upload_config, "gambar").await?;

    let input = CreateGaleriInput {
        judul: form.text("judul").to_string(),
        gambar: form.file,
    };

    let row = state
        .galeri_service
        .create(&session.access_token, input)
        .await
        .map_err(map_error)?;

    Ok((
        StatusCode::CREATED,
        Json(GaleriSavedResponse {
            message: "✅ Galeri berhasil ditambahkan!".to_string(),
            redirect_to: "/admin/galeri".to_string(),
            redirect_delay_ms: 0,
            galeri: GaleriResponse::new(&state.galeri_service, row),
        }),
    ))
}

/// PUT /admin/galeri/{id} - update an item; the image is replaced only
/// when a new file is part of the form
async fn update_galeri(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<GaleriSavedResponse>, ApiError> {
    let form = read_content_form(multipart, &state.upload_config, "gambar").await?;

    let input = UpdateGaleriInput {
        judul: form.text("judul").to_string(),
        gambar: form.file,
    };

    let row = state
        .galeri_service
        .update(&session.access_token, id, input)
        .await
        .map_err(map_error)?;

    Ok(Json(GaleriSavedResponse {
        message: "✅ Galeri berhasil diperbarui!".to_string(),
        redirect_to: "/admin/galeri".to_string(),
        redirect_delay_ms: 0,
        galeri: GaleriResponse::new(&state.galeri_service, row),
    }))
}

/// DELETE /admin/galeri/{id} - remove an item and its image
///
/// The unarmed call looks the row up to build the prompt but changes
/// nothing.
async fn delete_galeri(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<axum::response::Response, ApiError> {
    if !query.confirm {
        let row = state
            .galeri_service
            .get(&session.access_token, id)
            .await
            .map_err(map_error)?;
        let judul = row.judul.unwrap_or_else(|| "Tanpa Judul".to_string());
        return Ok(Json(ConfirmRequiredResponse {
            confirm_required: true,
            message: format!("Yakin ingin menghapus galeri \"{}\"?", judul),
        })
        .into_response());
    }

    state
        .galeri_service
        .delete(&session.access_token, id)
        .await
        .map_err(map_error)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
