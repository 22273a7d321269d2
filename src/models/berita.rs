//! Berita (news article) model
//!
//! A row in the hosted `berita` table. Every row references exactly one
//! blob in the article-image bucket through `gambar` (the storage key);
//! the reference is maintained by operation ordering, not by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Berita entity as stored in the `berita` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Berita {
    /// Unique identifier, assigned by the store on insert
    pub id: i64,
    /// Article title
    pub judul: String,
    /// Article body, may contain embedded line breaks
    pub isi: String,
    /// Storage key of the article image
    pub gambar: String,
    /// Creation timestamp, assigned by the store; default list sort key
    pub created_at: DateTime<Utc>,
}

/// Row payload for inserting a new berita
///
/// `id` and `created_at` are assigned by the store and therefore absent.
#[derive(Debug, Clone, Serialize)]
pub struct NewBerita {
    pub judul: String,
    pub isi: String,
    pub gambar: String,
}

/// Row payload for updating a berita by id
///
/// The update surface always writes all three mutable columns.
#[derive(Debug, Clone, Serialize)]
pub struct BeritaChanges {
    pub judul: String,
    pub isi: String,
    pub gambar: String,
}
