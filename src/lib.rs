//! Kelola - administration service for news and gallery content
//!
//! This library provides the core functionality for the Kelola admin service:
//! session-gated routing, the content lifecycle for the `berita` and `galeri`
//! collections, and HTTP clients for the hosted auth/table/storage services.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod supabase;
