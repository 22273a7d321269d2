//! Data models
//!
//! This module contains the data structures used throughout the Kelola
//! admin service. Models represent:
//! - Rows in the hosted table store (Berita, Galeri)
//! - The authenticated session returned by the hosted auth service
//! - Internal data transfer objects (upload payloads, row changes)

mod berita;
mod galeri;
mod session;
mod upload;

pub use berita::{Berita, BeritaChanges, NewBerita};
pub use galeri::{Galeri, GaleriChanges, NewGaleri};
pub use session::{AuthUser, Session};
pub use upload::UploadedFile;
