//! Filesystem image store - files are served back under `/uploads`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quill_core::error::StorageError;
use quill_core::ports::ImageStore;

/// Stores uploads as flat files in a single directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    /// Use `root` as the upload directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<unix millis>-<8 hex chars><.ext>`; the extension comes from the
    /// client file name when it looks sane.
    fn generate_name(original_name: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            &suffix[..8],
            extension
        )
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let file_name = Self::generate_name(original_name);
        tokio::fs::write(self.root.join(&file_name), bytes).await?;

        tracing::debug!(file = %file_name, size = bytes.len(), "Stored uploaded image");
        Ok(format!("/{}", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_writes_file_and_returns_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path()).unwrap();

        let reference = store.store("Cover.PNG", b"fake image").await.unwrap();

        assert!(reference.starts_with('/'));
        assert!(reference.ends_with(".png"));
        let on_disk = std::fs::read(dir.path().join(&reference[1..])).unwrap();
        assert_eq!(on_disk, b"fake image");
    }

    #[test]
    fn test_generated_name_drops_suspicious_extension() {
        let name = LocalImageStore::generate_name("evil.ph p");
        assert!(!name.contains('.'));

        let name = LocalImageStore::generate_name("no-extension");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads").join("images");

        let store = LocalImageStore::new(&nested).unwrap();
        assert!(store.root().is_dir());
    }
}
