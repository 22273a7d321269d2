//! Upload payload

use bytes::Bytes;

/// A file received from a multipart form, ready for the blob store
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the browser; feeds key derivation
    pub name: String,
    /// MIME type reported by the browser
    pub content_type: String,
    /// Raw file contents
    pub bytes: Bytes,
}
