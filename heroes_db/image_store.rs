use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use heroes_app::storage::{IMAGES_PREFIX, ImageStore, ImageUpload, image_path};
use heroes_types::errors::{ApplicationError, Result};

/// Stores portraits as plain files under `<uploads>/images`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    images_dir: PathBuf,
}

impl FsImageStore {
    pub fn new(uploads_dir: impl AsRef<Path>) -> Self {
        Self {
            images_dir: uploads_dir.as_ref().join(IMAGES_PREFIX),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Only the file name of a stored path is used, so a path can't point
    /// outside the images directory.
    fn resolve(&self, relative_path: &str) -> Option<PathBuf> {
        Path::new(relative_path)
            .file_name()
            .map(|name| self.images_dir.join(name))
    }
}

#[async_trait::async_trait]
impl ImageStore for FsImageStore {
    async fn save(&self, upload: &ImageUpload) -> Result<String, ApplicationError> {
        upload.ensure_supported()?;

        // Created on first upload rather than at startup.
        tokio::fs::create_dir_all(&self.images_dir).await?;

        let file_name = upload.generate_file_name();
        tokio::fs::write(self.images_dir.join(&file_name), &upload.bytes).await?;

        tracing::debug!(
            "Stored image {} ({} bytes) as {}",
            upload.file_name,
            upload.bytes.len(),
            file_name
        );
        Ok(image_path(&file_name))
    }

    async fn delete(&self, relative_path: &str) -> Result<(), ApplicationError> {
        let Some(path) = self.resolve(relative_path) else {
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed image {}", relative_path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use heroes_app::test_utils::tests::image_upload_factory;
    use heroes_types::errors::AppError;

    use super::*;

    #[tokio::test]
    async fn test_save_creates_directory_lazily() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path());
        assert!(!store.images_dir().exists());

        let path = store
            .save(&image_upload_factory("s.png", "image/png"))
            .await
            .unwrap();

        assert!(path.starts_with("images/image-"));
        assert!(path.ends_with(".png"));
        let on_disk = tmp.path().join(&path);
        assert!(on_disk.exists());
        assert_eq!(std::fs::read(on_disk).unwrap(), b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_save_rejects_unsupported_type() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path());

        let result = store
            .save(&image_upload_factory("notes.txt", "text/plain"))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::UnsupportedFileType { .. }))
        ));
        assert!(!store.images_dir().exists(), "Nothing should be written");
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path());
        let path = store
            .save(&image_upload_factory("s.gif", "image/gif"))
            .await
            .unwrap();

        store.delete(&path).await.unwrap();

        assert!(!tmp.path().join(&path).exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_noop() {
        let tmp = TempDir::new().unwrap();
        let store = FsImageStore::new(tmp.path());

        assert!(store.delete("images/never-stored.png").await.is_ok());
        assert!(store.delete("").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_stays_inside_images_dir() {
        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("keep.png");
        std::fs::write(&outside, b"keep").unwrap();
        let store = FsImageStore::new(tmp.path().join("uploads"));

        store.delete("images/../../keep.png").await.unwrap();

        assert!(outside.exists());
    }
}
