//! File archive service: metadata rows plus local storage for uploads

use std::path::{Path, PathBuf};

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
    models::{
        enums::FileCategory,
        file_record::{CreateFileRecord, FileRecord, StoredFile, UpdateFileRecord},
    },
    repository::Repository,
};

/// A file received through the upload endpoint
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    /// Display name; defaults to the file name
    pub name: Option<String>,
    pub category: FileCategory,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct FilesService {
    repository: Repository,
    storage: StorageConfig,
}

impl FilesService {
    pub fn new(repository: Repository, storage: StorageConfig) -> Self {
        Self { repository, storage }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.storage.max_upload_bytes
    }

    pub async fn list(&self) -> AppResult<Vec<FileRecord>> {
        self.repository.files.list().await
    }

    pub async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        data.validate()?;
        self.repository.files.create(data).await
    }

    /// Write the upload to storage, then record it. The stored file is removed
    /// again if the row cannot be inserted.
    pub async fn upload(&self, upload: Upload) -> AppResult<FileRecord> {
        if upload.bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if upload.bytes.len() > self.storage.max_upload_bytes {
            return Err(AppError::Validation(format!(
                "File exceeds the {} byte limit",
                self.storage.max_upload_bytes
            )));
        }

        let storage_key = storage_key(&upload.file_name);
        let path = self.path_for(&storage_key);

        tokio::fs::create_dir_all(&self.storage.upload_dir)
            .await
            .map_err(|e| AppError::Internal(format!("Cannot create upload directory: {}", e)))?;
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Cannot store upload: {}", e)))?;

        let stored = StoredFile {
            name: upload
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| upload.file_name.clone()),
            category: upload.category,
            notes: upload.notes,
            url: format!("{}/{}", self.storage.public_base_url.trim_end_matches('/'), storage_key),
            mime_type: upload.content_type,
            size_bytes: upload.bytes.len() as i64,
            storage_key,
        };

        match self.repository.files.create_stored(&stored).await {
            Ok(record) => {
                tracing::info!(id = record.id, key = %stored.storage_key, "File uploaded");
                Ok(record)
            }
            Err(e) => {
                remove_quietly(&path).await;
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: i32, data: &UpdateFileRecord) -> AppResult<FileRecord> {
        data.validate()?;
        self.repository.files.update(id, data).await
    }

    /// Delete the record; a stored upload is removed best-effort
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if let Some(key) = self.repository.files.delete(id).await? {
            remove_quietly(&self.path_for(&key)).await;
        }
        tracing::info!(id, "File deleted");
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        Path::new(&self.storage.upload_dir).join(key)
    }
}

/// Unique storage name: a UUID followed by the sanitized original name
fn storage_key(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    let clean: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    format!("{}-{}", Uuid::new_v4(), clean)
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Failed to remove stored file {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_strips_directories_and_odd_characters() {
        let key = storage_key("../../etc/Laporan Bulanan (Mei).pdf");
        assert!(key.ends_with("-Laporan_Bulanan__Mei_.pdf"));
        assert!(!key.contains('/'));
    }

    #[test]
    fn test_storage_keys_are_unique() {
        assert_ne!(storage_key("a.pdf"), storage_key("a.pdf"));
    }

    #[tokio::test]
    async fn test_remove_missing_file_does_not_fail() {
        remove_quietly(Path::new("/nonexistent/elban/file.pdf")).await;
    }
}
