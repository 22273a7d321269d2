//! Berita lifecycle service
//!
//! Orchestrates the news-article collection against the hosted table store
//! and image bucket: list+filter, create (upload-then-insert), update
//! (optional re-upload, old blob left in place), delete
//! (remove-blob-then-delete-row).
//!
//! The upload-then-insert ordering is not transactional: an insert failure
//! after a successful upload leaves an orphaned blob, and an update that
//! swaps the image never removes the replaced blob. Both windows are
//! source behavior and are preserved here.

use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;

use crate::models::{Berita, BeritaChanges, NewBerita, UploadedFile};
use crate::services::title_matches;
use crate::supabase::{BeritaRepository, BlobStore, TableError};

/// Message shown when the create form is missing any required field
pub const MSG_BERITA_REQUIRED: &str = "Judul, isi, dan gambar berita harus diisi.";

/// Message shown when the update form is missing a text field
pub const MSG_BERITA_TEXT_REQUIRED: &str = "Judul dan isi berita harus diisi.";

/// Error type for berita lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum BeritaServiceError {
    /// Missing required field(s), caught before any network call
    #[error("{0}")]
    Validation(String),

    /// Row does not exist
    #[error("Berita tidak ditemukan: {0}")]
    NotFound(i64),

    /// Blob write failed; no row was touched
    #[error("Gagal upload gambar: {0}")]
    Upload(String),

    /// Blob removal failed; the delete was aborted and the row remains
    #[error("Gagal menghapus gambar: {0}")]
    RemoveImage(String),

    /// Row insert/update/delete failed at the table store
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Input for creating a berita
#[derive(Debug)]
pub struct CreateBeritaInput {
    pub judul: String,
    pub isi: String,
    pub gambar: Option<UploadedFile>,
}

/// Input for updating a berita; `gambar` is only set when the user picked
/// a replacement file
#[derive(Debug)]
pub struct UpdateBeritaInput {
    pub judul: String,
    pub isi: String,
    pub gambar: Option<UploadedFile>,
}

/// Derive the storage key for a berita image: upload timestamp in
/// milliseconds plus the original file extension.
///
/// The original filename's last dot-separated segment is kept verbatim; a
/// name without a dot contributes itself whole. Collision avoidance rests
/// entirely on the timestamp - the key is not checked for uniqueness.
pub fn image_key(now_millis: i64, original_name: &str) -> String {
    let ext = original_name.rsplit('.').next().unwrap_or(original_name);
    format!("{}.{}", now_millis, ext)
}

/// Content lifecycle manager for the berita collection
pub struct BeritaService {
    repo: Arc<dyn BeritaRepository>,
    storage: Arc<dyn BlobStore>,
    bucket: String,
}

impl BeritaService {
    pub fn new(
        repo: Arc<dyn BeritaRepository>,
        storage: Arc<dyn BlobStore>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            storage,
            bucket: bucket.into(),
        }
    }

    /// All rows newest-first, filtered in memory by title substring
    pub async fn list(&self, token: &str, query: &str) -> Result<Vec<Berita>, BeritaServiceError> {
        let rows = self.repo.list_desc(token).await?;
        Ok(rows
            .into_iter()
            .filter(|row| title_matches(Some(&row.judul), query))
            .collect())
    }

    /// Single row by id
    pub async fn get(&self, token: &str, id: i64) -> Result<Berita, BeritaServiceError> {
        self.repo
            .get_by_id(token, id)
            .await?
            .ok_or(BeritaServiceError::NotFound(id))
    }

    /// Upload the image, then insert the row referencing the stored key.
    ///
    /// An upload failure aborts before any row write. An insert failure
    /// does NOT remove the uploaded blob (known orphan window).
    pub async fn create(
        &self,
        token: &str,
        input: CreateBeritaInput,
    ) -> Result<Berita, BeritaServiceError> {
        let file = match input.gambar {
            Some(file) if !input.judul.trim().is_empty() && !input.isi.trim().is_empty() => file,
            _ => {
                return Err(BeritaServiceError::Validation(
                    MSG_BERITA_REQUIRED.to_string(),
                ))
            }
        };

        let key = image_key(Utc::now().timestamp_millis(), &file.name);
        self.upload(token, &key, &file.content_type, file.bytes)
            .await?;

        let row = self
            .repo
            .insert(
                token,
                &NewBerita {
                    judul: input.judul,
                    isi: input.isi,
                    gambar: key,
                },
            )
            .await?;

        tracing::info!("Berita created: id={} gambar={}", row.id, row.gambar);
        Ok(row)
    }

    /// Write all mutable columns by id, uploading a replacement image
    /// first when one was selected.
    ///
    /// The previous blob is never removed, whatever the outcome; a failed
    /// row update after a successful upload orphans the new blob.
    pub async fn update(
        &self,
        token: &str,
        id: i64,
        input: UpdateBeritaInput,
    ) -> Result<Berita, BeritaServiceError> {
        let existing = self.get(token, id).await?;

        if input.judul.trim().is_empty() || input.isi.trim().is_empty() {
            return Err(BeritaServiceError::Validation(
                MSG_BERITA_TEXT_REQUIRED.to_string(),
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

        let changes = BeritaChanges {
            judul: input.judul,
            isi: input.isi,
            gambar,
        };
        self.repo.update(token, id, &changes).await?;

        Ok(Berita {
            id,
            judul: changes.judul,
            isi: changes.isi,
            gambar: changes.gambar,
            created_at: existing.created_at,
        })
    }

    /// Remove the referenced blob, then the row.
    ///
    /// A blob-removal failure aborts the whole delete; the row is only
    /// removed after the blob is gone.
    pub async fn delete(&self, token: &str, id: i64) -> Result<(), BeritaServiceError> {
        let existing = self.get(token, id).await?;

        self.storage
            .remove(token, &self.bucket, std::slice::from_ref(&existing.gambar))
            .await
            .map_err(|e| BeritaServiceError::RemoveImage(e.to_string()))?;

        self.repo.delete(token, id).await?;
        tracing::info!("Berita deleted: id={}", id);
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
    ) -> Result<(), BeritaServiceError> {
        self.storage
            .upload(token, &self.bucket, key, content_type, data)
            .await
            .map_err(|e| BeritaServiceError::Upload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_uses_timestamp_and_extension() {
        assert_eq!(image_key(1700000000000, "foto.png"), "1700000000000.png");
        assert_eq!(image_key(1700000000000, "a.b.JPG"), "1700000000000.JPG");
    }

    #[test]
    fn test_image_key_without_extension_keeps_name() {
        assert_eq!(image_key(42, "foto"), "42.foto");
    }

    #[test]
    fn test_image_key_trailing_dot() {
        assert_eq!(image_key(42, "foto."), "42.");
    }
}
