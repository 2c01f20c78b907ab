use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use heroes_types::errors::{AppError, ApplicationError, DbError};

/// Body of every non-hero JSON reply.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An application error on its way out as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl<E> From<E> for ApiError
where
    E: Into<ApplicationError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ApplicationError::App(AppError::Validation(_))
            | ApplicationError::App(AppError::NoImage)
            | ApplicationError::App(AppError::UnsupportedFileType { .. })
            | ApplicationError::Db(DbError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApplicationError::Db(DbError::HeroNotFound(_)) => StatusCode::NOT_FOUND,
            // Malformed ids are reported like any other store fault.
            ApplicationError::Db(DbError::InvalidHeroId(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self.0);
        }

        (status, Json(MessageResponse::new(self.0.to_string()))).into_response()
    }
}
