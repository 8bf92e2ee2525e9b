// src/services/upload_services.rs - multipart field handling and file storage

use std::path::{Path, PathBuf};

use actix_multipart::Field;
use chrono::Utc;
use futures::StreamExt;
use rand::Rng;

use crate::errors::ApiError;

/// A multipart file persisted into the uploads directory.
#[derive(Debug)]
pub struct SavedFile {
    pub file_name: String,
    /// Path string stored in rows and handed to clients, `/uploads/<file>`.
    pub public_path: String,
    pub disk_path: PathBuf,
}

/// `<millis>-<random>` plus the original extension, unique enough for a
/// single shared uploads directory.
fn unique_filename(original: Option<&str>) -> String {
    let ext = original
        .and_then(|name| Path::new(name).extension())
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, ext)
}

/// Drain a file field to disk under the uploads directory.
pub async fn save_field(uploads_dir: &Path, field: &mut Field) -> Result<SavedFile, ApiError> {
    let original = field.content_disposition().get_filename().map(String::from);
    let file_name = unique_filename(original.as_deref());
    let disk_path = uploads_dir.join(&file_name);

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk?);
    }
    tokio::fs::write(&disk_path, &bytes).await?;

    Ok(SavedFile {
        public_path: format!("/uploads/{}", file_name),
        file_name,
        disk_path,
    })
}

/// Drain a text field into a string.
pub async fn read_text_field(field: &mut Field) -> Result<String, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk?);
    }
    String::from_utf8(bytes)
        .map_err(|_| ApiError::BadRequest("field must be valid UTF-8".to_string()))
}

/// Drain and discard a field so the next one can be read.
pub async fn drain_field(field: &mut Field) -> Result<(), ApiError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}

/// Best-effort removal of a stored media file referenced by its public path.
/// A missing file is not an error.
pub fn remove_media(uploads_dir: &Path, public_path: &str) {
    if let Some(name) = public_path.rsplit('/').next() {
        if name.is_empty() {
            return;
        }
        let _ = std::fs::remove_file(uploads_dir.join(name));
    }
}
