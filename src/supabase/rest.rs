//! Table store client
//!
//! One REST client over the hosted table store, plus a repository trait per
//! collection. The repositories expose exactly the operations the content
//! lifecycle needs: select-all ordered by creation time descending,
//! select-by-id, insert, update-by-id and delete-by-id. Filtering and
//! pagination are deliberately absent - lists are fetched whole and
//! filtered in memory.

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::models::{Berita, BeritaChanges, Galeri, GaleriChanges, NewBerita, NewGaleri};

/// Error type for table store calls
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The store answered with an unexpected status
    #[error("Store error: {0}")]
    Service(String),

    /// The request never completed
    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Shared HTTP client for the hosted table store's REST surface
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestClient {
    pub fn new(http: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: reqwest::Method, url: String, token: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
    }

    async fn fail(response: reqwest::Response) -> TableError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        TableError::Service(format!("{}: {}", status, body))
    }

    /// Select all rows, ordered by `created_at` descending
    pub async fn select_all_desc<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
    ) -> Result<Vec<T>, TableError> {
        let url = format!(
            "{}?select=*&order=created_at.desc",
            self.table_url(table)
        );
        let response = self.request(reqwest::Method::GET, url, token).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(response.json().await?)
    }

    /// Select a single row by id
    pub async fn select_by_id<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        id: i64,
    ) -> Result<Option<T>, TableError> {
        let url = format!("{}?select=*&id=eq.{}", self.table_url(table), id);
        let response = self.request(reqwest::Method::GET, url, token).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        let mut rows: Vec<T> = response.json().await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// Insert one row and return the stored representation
    pub async fn insert<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        token: &str,
        table: &str,
        row: &B,
    ) -> Result<T, TableError> {
        let response = self
            .request(reqwest::Method::POST, self.table_url(table), token)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        let mut rows: Vec<T> = response.json().await?;
        if rows.is_empty() {
            return Err(TableError::Service(
                "insert returned an empty representation".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    /// Update a row by id
    pub async fn update_by_id<B: Serialize + Sync>(
        &self,
        token: &str,
        table: &str,
        id: i64,
        changes: &B,
    ) -> Result<(), TableError> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        let response = self
            .request(reqwest::Method::PATCH, url, token)
            .json(changes)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(())
    }

    /// Delete a row by id
    pub async fn delete_by_id(&self, token: &str, table: &str, id: i64) -> Result<(), TableError> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        let response = self
            .request(reqwest::Method::DELETE, url, token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(())
    }
}

/// Repository for the `berita` collection
#[async_trait]
pub trait BeritaRepository: Send + Sync {
    /// All rows, newest first
    async fn list_desc(&self, token: &str) -> Result<Vec<Berita>, TableError>;

    /// Single row by id
    async fn get_by_id(&self, token: &str, id: i64) -> Result<Option<Berita>, TableError>;

    /// Insert a row; id and created_at are assigned by the store
    async fn insert(&self, token: &str, row: &NewBerita) -> Result<Berita, TableError>;

    /// Write all mutable columns by id
    async fn update(&self, token: &str, id: i64, changes: &BeritaChanges)
        -> Result<(), TableError>;

    /// Delete a row by id
    async fn delete(&self, token: &str, id: i64) -> Result<(), TableError>;
}

/// Repository for the `galeri` collection
#[async_trait]
pub trait GaleriRepository: Send + Sync {
    async fn list_desc(&self, token: &str) -> Result<Vec<Galeri>, TableError>;
    async fn get_by_id(&self, token: &str, id: i64) -> Result<Option<Galeri>, TableError>;
    async fn insert(&self, token: &str, row: &NewGaleri) -> Result<Galeri, TableError>;
    async fn update(&self, token: &str, id: i64, changes: &GaleriChanges)
        -> Result<(), TableError>;
    async fn delete(&self, token: &str, id: i64) -> Result<(), TableError>;
}

const BERITA_TABLE: &str = "berita";
const GALERI_TABLE: &str = "galeri";

/// [`BeritaRepository`] backed by the hosted table store
pub struct SupabaseBeritaRepository {
    rest: Arc<RestClient>,
}

impl SupabaseBeritaRepository {
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl BeritaRepository for SupabaseBeritaRepository {
    async fn list_desc(&self, token: &str) -> Result<Vec<Berita>, TableError> {
        self.rest.select_all_desc(token, BERITA_TABLE).await
    }

    async fn get_by_id(&self, token: &str, id: i64) -> Result<Option<Berita>, TableError> {
        self.rest.select_by_id(token, BERITA_TABLE, id).await
    }

    async fn insert(&self, token: &str, row: &NewBerita) -> Result<Berita, TableError> {
        self.rest.insert(token, BERITA_TABLE, row).await
    }

    async fn update(
        &self,
        token: &str,
        id: i64,
        changes: &BeritaChanges,
    ) -> Result<(), TableError> {
        self.rest.update_by_id(token, BERITA_TABLE, id, changes).await
    }

    async fn delete(&self, token: &str, id: i64) -> Result<(), TableError> {
        self.rest.delete_by_id(token, BERITA_TABLE, id).await
    }
}

/// [`GaleriRepository`] backed by the hosted table store
pub struct SupabaseGaleriRepository {
    rest: Arc<RestClient>,
}

impl SupabaseGaleriRepository {
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl GaleriRepository for SupabaseGaleriRepository {
    async fn list_desc(&self, token: &str) -> Result<Vec<Galeri>, TableError> {
        self.rest.select_all_desc(token, GALERI_TABLE).await
    }

    async fn get_by_id(&self, token: &str, id: i64) -> Result<Option<Galeri>, TableError> {
        self.rest.select_by_id(token, GALERI_TABLE, id).await
    }

    async fn insert(&self, token: &str, row: &NewGaleri) -> Result<Galeri, TableError> {
        self.rest.insert(token, GALERI_TABLE, row).await
    }

    async fn update(
        &self,
        token: &str,
        id: i64,
        changes: &GaleriChanges,
    ) -> Result<(), TableError> {
        self.rest.update_by_id(token, GALERI_TABLE, id, changes).await
    }

    async fn delete(&self, token: &str, id: i64) -> Result<(), TableError> {
        self.rest.delete_by_id(token, GALERI_TABLE, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let client = RestClient::new(
            reqwest::Client::new(),
            "https://example.supabase.co/",
            "anon",
        );
        assert_eq!(
            client.table_url("berita"),
            "https://example.supabase.co/rest/v1/berita"
        );
    }

    #[test]
    fn test_row_deserializes_store_timestamp() {
        let body = serde_json::json!({
            "id": 7,
            "judul": "Pengumuman",
            "isi": "Isi berita",
            "gambar": "1700000000000.png",
            "created_at": "2024-11-14T09:26:40.123456+00:00"
        });
        let row: Berita = serde_json::from_value(body).unwrap();
        assert_eq!(row.id, 7);
        assert_eq!(row.gambar, "1700000000000.png");
    }

    #[test]
    fn test_galeri_row_allows_null_title() {
        let body = serde_json::json!({
            "id": 1,
            "judul": null,
            "gambar": "1700000000000_foto.jpg",
            "created_at": "2024-11-14T09:26:40+00:00"
        });
        let row: Galeri = serde_json::from_value(body).unwrap();
        assert!(row.judul.is_none());
    }
}
