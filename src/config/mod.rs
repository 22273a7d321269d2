//! Configuration management
//!
//! This module handles loading and parsing configuration for the Kelola
//! admin service. Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted store (auth/table/storage) configuration
    #[serde(default)]
    pub supabase: SupabaseConfig,
    /// Bucket names per collection
    #[serde(default)]
    pub storage: StorageConfig,
    /// Upload validation configuration
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (for cookie-based auth)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Hosted store configuration
///
/// One base URL serves the auth, table and storage APIs under their
/// respective path prefixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL
    #[serde(default = "default_supabase_url")]
    pub url: String,
    /// Anonymous API key, sent with every request
    #[serde(default)]
    pub anon_key: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: default_supabase_url(),
            anon_key: String::new(),
        }
    }
}

fn default_supabase_url() -> String {
    "http://localhost:54321".to_string()
}

/// Bucket names per content collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding berita images
    #[serde(default = "default_berita_bucket")]
    pub berita_bucket: String,
    /// Bucket holding galeri images
    #[serde(default = "default_galeri_bucket")]
    pub galeri_bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            berita_bucket: default_berita_bucket(),
            galeri_bucket: default_galeri_bucket(),
        }
    }
}

fn default_berita_bucket() -> String {
    "berita-images".to_string()
}

fn default_galeri_bucket() -> String {
    "galeri-images".to_string()
}

/// Upload validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum file size in bytes (default: 10MB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed image MIME types
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
        "image/svg+xml".to_string(),
    ]
}

impl UploadConfig {
    /// Check if a MIME type is allowed
    pub fn is_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        // Handle empty file - return defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - KELOLA_SERVER_HOST
    /// - KELOLA_SERVER_PORT
    /// - KELOLA_SERVER_CORS_ORIGIN
    /// - KELOLA_SUPABASE_URL
    /// - KELOLA_SUPABASE_ANON_KEY
    /// - KELOLA_STORAGE_BERITA_BUCKET
    /// - KELOLA_STORAGE_GALERI_BUCKET
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("KELOLA_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("KELOLA_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(origin) = std::env::var("KELOLA_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Ok(url) = std::env::var("KELOLA_SUPABASE_URL") {
            self.supabase.url = url;
        }
        if let Ok(key) = std::env::var("KELOLA_SUPABASE_ANON_KEY") {
            self.supabase.anon_key = key;
        }
        if let Ok(bucket) = std::env::var("KELOLA_STORAGE_BERITA_BUCKET") {
            self.storage.berita_bucket = bucket;
        }
        if let Ok(bucket) = std::env::var("KELOLA_STORAGE_GALERI_BUCKET") {
            self.storage.galeri_bucket = bucket;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.berita_bucket, "berita-images");
        assert_eq!(config.storage.galeri_bucket, "galeri-images");
        assert_eq!(config.upload.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_parse_partial_yaml_fills_defaults() {
        let yaml = r#"
server:
  port: 9000
supabase:
  url: https://example.supabase.co
  anon_key: anon-123
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.supabase.url, "https://example.supabase.co");
        assert_eq!(config.supabase.anon_key, "anon-123");
        assert_eq!(config.storage.galeri_bucket, "galeri-images");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let config = Config::load(std::path::Path::new("does-not-exist.yml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_upload_type_allowed() {
        let config = UploadConfig::default();
        assert!(config.is_type_allowed("image/png"));
        assert!(config.is_type_allowed("image/jpeg"));
        assert!(!config.is_type_allowed("application/pdf"));
    }
}
