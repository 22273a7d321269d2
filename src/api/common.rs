//! Shared helpers for the content API handlers

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::api::middleware::ApiError;
use crate::config::UploadConfig;
use crate::models::UploadedFile;

/// A parsed multipart content form: named text fields plus at most one
/// image part.
#[derive(Debug, Default)]
pub struct ContentForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl ContentForm {
    /// Trimmed text field lookup; missing fields read as empty.
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(|s| s.trim()).unwrap_or("")
    }
}

/// Read a multipart request into a [`ContentForm`].
///
/// The part named `file_field` is treated as the image. An empty file
/// part means no file was selected and leaves `file` unset. Type and
/// size limits are enforced here so every handler sees the same
/// rejection.
pub async fn read_content_form(
    mut multipart: Multipart,
    config: &UploadConfig,
    file_field: &str,
) -> Result<ContentForm, ApiError> {
    let mut form = ContentForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation_error(format!("Form tidak valid: {}", e)))?
    {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if name == file_field {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation_error(format!("Gagal membaca file: {}", e)))?;

            // A file input submitted without a selection arrives as an
            // empty part.
            if bytes.is_empty() {
                continue;
            }

            if !config.is_type_allowed(&content_type) {
                return Err(ApiError::validation_error(format!(
                    "Tipe file tidak didukung: {}",
                    content_type
                )));
            }
            if bytes.len() as u64 > config.max_file_size {
                return Err(ApiError::validation_error(format!(
                    "Ukuran file melebihi batas {} byte",
                    config.max_file_size
                )));
            }

            form.file = Some(UploadedFile {
                name: file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation_error(format!("Form tidak valid: {}", e)))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_trims_and_defaults_empty() {
        let mut form = ContentForm::default();
        form.fields.insert("judul".to_string(), "  Berita  ".to_string());
        assert_eq!(form.text("judul"), "Berita");
        assert_eq!(form.text("isi"), "");
    }
}
