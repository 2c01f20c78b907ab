use thiserror::Error;

/// Errors for request and use case validation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Please upload an image")]
    NoImage,

    #[error("Error: Images only!")]
    UnsupportedFileType { file_name: String, content_type: String },
}
