//! Galeri lifecycle service
//!
//! Same shape as the berita lifecycle with the gallery collection's own
//! bucket, table, key derivation and required-field set: the file is
//! checked first with its own message, the title is required at this
//! boundary (the data layer keeps it nullable), and there is no body
//! field.

use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;

use crate::models::{Galeri, GaleriChanges, NewGaleri, UploadedFile};
use crate::services::title_matches;
use crate::supabase::{BlobStore, GaleriRepository, TableError};

/// Message shown when no file was selected
pub const MSG_GALERI_FILE_REQUIRED: &str = "Silakan pilih gambar terlebih dahulu.";

/// Message shown when the title is empty
pub const MSG_GALERI_TITLE_REQUIRED: &str = "Judul wajib diisi.";

/// Error type for galeri lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum GaleriServiceError {
    /// Missing required field(s), caught before any network call
    #[error("{0}")]
    Validation(String),

    /// Row does not exist
    #[error("Galeri tidak ditemukan: {0}")]
    NotFound(i64),

    /// Blob write failed; no row was touched
    #[error("Gagal upload gambar: {0}")]
    Upload(String),

    /// Blob removal failed; the delete was aborted and the row remains
    #[error("Gagal hapus gambar: {0}")]
    RemoveImage(String),

    /// Row insert/update/delete failed at the table store
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Input for creating a galeri item
#[derive(Debug)]
pub struct CreateGaleriInput {
    pub judul: String,
    pub gambar: Option<UploadedFile>,
}

/// Input for updating a galeri item
#[derive(Debug)]
pub struct UpdateGaleriInput {
    pub judul: String,
    pub gambar: Option<UploadedFile>,
}

/// Derive the storage key for a galeri image: upload timestamp in
/// milliseconds plus the original filename, joined by an underscore.
/// Collision avoidance rests entirely on the timestamp.
pub fn image_key(now_millis: i64, original_name: &str) -> String {
    format!("{}_{}", now_millis, original_name)
}

/// Content lifecycle manager for the galeri collection
pub struct GaleriService {
    repo: Arc<dyn GaleriRepository>,
    storage: Arc<dyn BlobStore>,
    bucket: String,
}

impl GaleriService {
    pub fn new(
        repo: Arc<dyn GaleriRepository>,
        storage: Arc<dyn BlobStore>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            storage,
            bucket: bucket.into(),
        }
    }

    /// All rows newest-first, filtered in memory by title substring.
    /// Rows without a title never match a non-empty query.
    pub async fn list(&self, token: &str, query: &str) -> Result<Vec<Galeri>, GaleriServiceError> {
        let rows = self.repo.list_desc(token).await?;
        Ok(rows
            .into_iter()
            .filter(|row| title_matches(row.judul.as_deref(), query))
            .collect())
    }

    /// Single row by id
    pub async fn get(&self, token: &str, id: i64) -> Result<Galeri, GaleriServiceError> {
        self.repo
            .get_by_id(token, id)
            .await?
            .ok_or(GaleriServiceError::NotFound(id))
    }

    /// Upload the image, then insert the row referencing the stored key.
    /// The file is validated first, with its own message; an insert
    /// failure does not remove the uploaded blob (known orphan window).
    pub async fn create(
        &self,
        token: &str,
        input: CreateGaleriInput,
    ) -> Result<Galeri, GaleriServiceError> {
        let file = input.gambar.ok_or_else(|| {
            GaleriServiceError::Validation(MSG_GALERI_FILE_REQUIRED.to_string())
        })?;
        if input.judul.trim().is_empty() {
            return Err(GaleriServiceError::Validation(
                MSG_GALERI_TITLE_REQUIRED.to_string(),
            ));
        }

        let key = image_key(Utc::now().timestamp_millis(), &file.name);
        self.upload(token, &key, &file.content_type, file.bytes)
            .await?;

        let row = self
            .repo
            .insert(
                token,
                &NewGaleri {
                    judul: input.judul,
                    gambar: key,
                },
            )
            .await?;

        tracing::info!("Galeri created: id={} gambar={}", row.id, row.gambar);
        Ok(row)
    }

    /// Write the mutable columns by id, uploading a replacement image
    /// first when one was selected. The previous blob is never removed.
    pub async fn update(
        &self,
        token: &str,
        id: i64,
        input: UpdateGaleriInput,
    ) -> Result<Galeri, GaleriServiceError> {
        let existing = self.get(token, id).await?;

        if input.judul.trim().is_empty() {
            return Err(GaleriServiceError::Validation(
                MSG_GALERI_TITLE_REQUIRED.to_string(),
            ));
        }

        let gambar = match input.gambar {
            Some(file) => {
                let key = image_key(Utc::now().timestamp_millis(), &file.name);
                self.upload(token, &key, &file.content_type, file.bytes)
                    .await?;
                key
            }
            None => existing.gambar,
        };

        let changes = GaleriChanges {
            judul: input.judul,
            gambar,
        };
        self.repo.update(token, id, &changes).await?;

        Ok(Galeri {
            id,
            judul: Some(changes.judul),
            gambar: changes.gambar,
            created_at: existing.created_at,
        })
    }

    /// Remove the referenced blob, then the row. A blob-removal failure
    /// aborts the whole delete.
    pub async fn delete(&self, token: &str, id: i64) -> Result<(), GaleriServiceError> {
        let existing = self.get(token, id).await?;

        self.storage
            .remove(token, &self.bucket, std::slice::from_ref(&existing.gambar))
            .await
            .map_err(|e| GaleriServiceError::RemoveImage(e.to_string()))?;

        self.repo.delete(token, id).await?;
        tracing::info!("Galeri deleted: id={}", id);
        Ok(())
    }

    /// Public display URL for a stored image key
    pub fn image_url(&self, key: &str) -> String {
        self.storage.public_url(&self.bucket, key)
    }

    async fn upload(
        &self,
        token: &str,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), GaleriServiceError> {
        self.storage
            .upload(token, &self.bucket, key, content_type, data)
            .await
            .map_err(|e| GaleriServiceError::Upload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_keeps_whole_filename() {
        assert_eq!(
            image_key(1700000000000, "foto sekolah.jpg"),
            "1700000000000_foto sekolah.jpg"
        );
    }

    #[test]
    fn test_image_key_without_extension() {
        assert_eq!(image_key(42, "foto"), "42_foto");
    }
}
