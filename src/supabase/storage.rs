//! Object storage client
//!
//! Blob upload/removal against the hosted storage service, plus the pure
//! public-URL mapping used when rendering stored images. Buckets have no
//! foreign-key relationship to table rows; consistency is kept only by the
//! calling order in the content lifecycle.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header;

/// Error type for storage calls
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage service answered with an unexpected status
    #[error("Storage error: {0}")]
    Service(String),

    /// The request never completed
    #[error("Storage transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the hosted object storage service
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write a blob under the given key
    async fn upload(
        &self,
        access_token: &str,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError>;

    /// Remove the blobs behind the given keys
    ///
    /// A missing blob is a failure, not "already gone" - callers abort on
    /// any error here.
    async fn remove(
        &self,
        access_token: &str,
        bucket: &str,
        keys: &[String],
    ) -> Result<(), StorageError>;

    /// Deterministic public URL for a stored key; no network call
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// HTTP implementation of [`BlobStore`] following the storage API
/// conventions of the hosted service
pub struct SupabaseStorage {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStorage {
    pub fn new(http: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for SupabaseStorage {
    async fn upload(
        &self,
        access_token: &str,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError> {
        let response = self
            .http
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url,
                bucket,
                urlencoding::encode(key)
            ))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .header(header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(StorageError::Service(format!("{}: {}", status, body)))
        }
    }

    async fn remove(
        &self,
        access_token: &str,
        bucket: &str,
        keys: &[String],
    ) -> Result<(), StorageError> {
        let response = self
            .http
            .delete(format!("{}/storage/v1/object/{}", self.base_url, bucket))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .json(&serde_json::json!({ "prefixes": keys }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(StorageError::Service(format!("{}: {}", status, body)))
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            urlencoding::encode(key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseStorage {
        SupabaseStorage::new(
            reqwest::Client::new(),
            "https://example.supabase.co",
            "anon",
        )
    }

    #[test]
    fn test_public_url_shape() {
        let url = storage().public_url("berita-images", "1700000000000.png");
        assert_eq!(
            url,
            "https://example.supabase.co/storage/v1/object/public/berita-images/1700000000000.png"
        );
    }

    #[test]
    fn test_public_url_encodes_key() {
        let url = storage().public_url("galeri-images", "1700000000000_foto sekolah.jpg");
        assert!(url.ends_with("/galeri-images/1700000000000_foto%20sekolah.jpg"));
    }

    #[test]
    fn test_public_url_is_deterministic() {
        let a = storage().public_url("galeri-images", "k.png");
        let b = storage().public_url("galeri-images", "k.png");
        assert_eq!(a, b);
    }
}
