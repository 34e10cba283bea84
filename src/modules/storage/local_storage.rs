use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Allowed MIME types for issue photos
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Check if a MIME type is allowed
pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// A file written by [`LocalStorage::store_image`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub key: String,
    pub url: String,
}

/// Disk-backed image store
pub struct LocalStorage {
    uploads_dir: PathBuf,
    public_path: String,
    max_image_size: usize,
}

impl LocalStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            uploads_dir: config.uploads_dir,
            public_path: config.public_path,
            max_image_size: config.max_image_size,
        }
    }

    /// Create the uploads directory if it does not exist yet
    pub async fn ensure_dir_exists(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.uploads_dir)
            .await
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to create uploads directory '{}': {}",
                    self.uploads_dir.display(),
                    e
                ))
            })
    }

    /// Generate a unique file key for the given content type
    pub fn generate_key(&self, content_type: &str) -> String {
        let extension = extension_for_content_type(content_type).unwrap_or("bin");
        format!("{}.{}", Uuid::new_v4(), extension)
    }

    /// Validate and store an image, returning its key and public URL
    pub async fn store_image(
        &self,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredFile, AppError> {
        if data.is_empty() {
            return Err(AppError::BadRequest("Image file is empty".to_string()));
        }

        if data.len() > self.max_image_size {
            return Err(AppError::BadRequest(format!(
                "Image too large. Maximum size is {} bytes ({} MB)",
                self.max_image_size,
                self.max_image_size / 1024 / 1024
            )));
        }

        if !is_image_type_allowed(content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let key = self.generate_key(content_type);
        self.upload(&key, data).await?;
        let url = self.public_url(&key);
        Ok(StoredFile { key, url })
    }

    /// Write raw bytes under `key`
    pub async fn upload(&self, key: &str, data: Vec<u8>) -> Result<(), AppError> {
        let path = self.uploads_dir.join(key);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store file '{}': {}", key, e)))?;

        debug!("Stored file '{}' ({} bytes)", path.display(), data.len());
        Ok(())
    }

    /// Delete the file stored under `key`
    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.uploads_dir.join(key);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to remove file '{}': {}", key, e)))?;

        debug!("Removed file '{}'", path.display());
        Ok(())
    }

    /// URL path the stored file is served under
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_path, key)
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    pub fn max_image_size(&self) -> usize {
        self.max_image_size
    }
}
