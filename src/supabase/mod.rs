//! Hosted store clients
//!
//! HTTP clients for the externally hosted collaborators: the auth/session
//! service, the relational table store and the object storage service.
//! Each collaborator is a trait seam with one production implementation,
//! so the service layer can be exercised against in-memory doubles.
//!
//! All calls are single-shot with transport-default timeouts; nothing here
//! retries, and every mutating call carries the caller's access token.

pub mod auth;
pub mod rest;
pub mod storage;

pub use auth::{AuthClient, AuthError, GotrueAuthClient};
pub use rest::{
    BeritaRepository, GaleriRepository, RestClient, SupabaseBeritaRepository,
    SupabaseGaleriRepository, TableError,
};
pub use storage::{BlobStore, StorageError, SupabaseStorage};
