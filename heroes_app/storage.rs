use chrono::Utc;
use rand::Rng;
use std::{fmt, path::Path};

use heroes_types::errors::{AppError, ApplicationError, Result};

/// Public prefix of every stored image path.
pub const IMAGES_PREFIX: &str = "images";

const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

/// An uploaded file as received from a multipart form.
#[derive(Clone)]
pub struct ImageUpload {
    /// Name of the form field carrying the file, used as file name prefix.
    pub field_name: String,
    /// File name as sent by the client.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Extension of the original file name, dot included and case preserved.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Both the extension and the declared content type must name an accepted image type.
    pub fn ensure_supported(&self) -> Result<(), ApplicationError> {
        let extension = self.extension().to_lowercase();
        let content_type = self.content_type.to_lowercase();

        let matches = |s: &str| ACCEPTED_IMAGE_TYPES.iter().any(|t| s.contains(t));
        if matches(&extension) && matches(&content_type) {
            return Ok(());
        }

        Err(AppError::UnsupportedFileType {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
        }
        .into())
    }

    /// `<field>-<unix millis>-<random 0..=1e9><ext>`
    pub fn generate_file_name(&self) -> String {
        let suffix = rand::thread_rng().gen_range(0..=1_000_000_000u32);
        format!(
            "{}-{}-{}{}",
            self.field_name,
            Utc::now().timestamp_millis(),
            suffix,
            self.extension()
        )
    }
}

/// Public relative path for a stored image file name.
pub fn image_path(file_name: &str) -> String {
    format!("{IMAGES_PREFIX}/{file_name}")
}

/// Filesystem side of a hero's portrait. Not part of any database transaction.
#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    /// Validates and stores the upload, returning `images/<generated name>`.
    async fn save(&self, upload: &ImageUpload) -> Result<String, ApplicationError>;

    /// Removes a previously stored image. Missing files are not an error.
    async fn delete(&self, relative_path: &str) -> Result<(), ApplicationError>;
}
