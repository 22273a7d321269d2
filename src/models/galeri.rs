//! Galeri (gallery item) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Galeri entity as stored in the `galeri` table
///
/// Unlike `Berita`, the title is nullable at the data layer; rows written
/// through the admin form always carry one, but older rows may not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Galeri {
    /// Unique identifier, assigned by the store on insert
    pub id: i64,
    /// Optional display title
    pub judul: Option<String>,
    /// Storage key of the gallery image
    pub gambar: String,
    /// Creation timestamp, assigned by the store; default list sort key
    pub created_at: DateTime<Utc>,
}

/// Row payload for inserting a new galeri item
#[derive(Debug, Clone, Serialize)]
pub struct NewGaleri {
    pub judul: String,
    pub gambar: String,
}

/// Row payload for updating a galeri item by id
#[derive(Debug, Clone, Serialize)]
pub struct GaleriChanges {
    pub judul: String,
    pub gambar: String,
}
