use axum::{
    Json,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use serde::Deserialize;
use uuid::Uuid;

use heroes_app::{
    cqrs::commands::{CreateHero, UpdateHero},
    storage::ImageUpload,
};
use heroes_types::{
    errors::{AppError, ApplicationError, Result},
    hero::{HeroChanges, HeroFields, parse_values},
};

use crate::handlers::ApiError;

/// Multipart field carrying the portrait.
pub const IMAGE_FIELD: &str = "image";

/// Hero fields as posted by the admin panel. Everything is optional at this
/// stage; each endpoint decides what it requires.
#[derive(Debug, Default, Clone)]
pub struct HeroForm {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub description: Option<String>,
    /// Comma separated tags.
    pub values: Option<String>,
    pub image: Option<ImageUpload>,
}

/// JSON flavour of the form. Files can only come through multipart.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroJson {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub description: Option<String>,
    pub values: Option<String>,
}

impl From<HeroJson> for HeroForm {
    fn from(json: HeroJson) -> Self {
        Self {
            name: json.name,
            nickname: json.nickname,
            birth_date: json.birth_date,
            death_date: json.death_date,
            description: json.description,
            values: json.values,
            image: None,
        }
    }
}

/// Picks the body parser from `Content-Type`. Any other body, or none at all,
/// reads as an empty form.
impl<S> FromRequest<S> for HeroForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(Self::from_multipart(multipart).await?);
        }

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<HeroJson>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(body.into());
        }

        if !content_type.is_empty() {
            tracing::debug!("Ignoring body with content type {content_type}");
        }
        Ok(Self::default())
    }
}

impl HeroForm {
    /// Reads every part of a multipart body. Unknown text fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApplicationError> {
        let mut form = HeroForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;

                // Browsers send an empty part when no file was picked.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.image = Some(ImageUpload {
                    field_name: name,
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                form.set_text(&name, value);
            }
        }

        Ok(form)
    }

    pub fn set_text(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" => &mut self.name,
            "nickname" => &mut self.nickname,
            "birthDate" => &mut self.birth_date,
            "deathDate" => &mut self.death_date,
            "description" => &mut self.description,
            "values" => &mut self.values,
            other => {
                tracing::debug!("Ignoring unknown form field {other}");
                return;
            }
        };
        *slot = Some(value);
    }

    /// A new hero needs a portrait, a tag list and every descriptive field.
    /// `deathDate` must be sent but may be empty.
    pub fn into_create_command(self) -> Result<CreateHero, ApplicationError> {
        let Some(image) = self.image else {
            return Err(AppError::NoImage.into());
        };
        let Some(values) = self.values else {
            return Err(AppError::Validation("values is required".to_string()).into());
        };

        let mut missing = Vec::new();
        let mut required = |field: &'static str, value: Option<String>| match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                missing.push(format!("{field} is required"));
                String::new()
            }
        };
        let name = required("name", self.name);
        let nickname = required("nickname", self.nickname);
        let birth_date = required("birthDate", self.birth_date);
        let description = required("description", self.description);

        let Some(death_date) = self.death_date else {
            missing.push("deathDate is required".to_string());
            return Err(AppError::Validation(missing.join(", ")).into());
        };
        if !missing.is_empty() {
            return Err(AppError::Validation(missing.join(", ")).into());
        }

        let fields = HeroFields {
            name,
            nickname,
            birth_date,
            death_date,
            description,
            values: parse_values(&values),
        };
        Ok(CreateHero::new(None, fields, image))
    }

    /// Empty fields leave the stored value untouched.
    pub fn into_update_command(self, id: Uuid) -> UpdateHero {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        let changes = HeroChanges {
            name: present(self.name),
            nickname: present(self.nickname),
            birth_date: present(self.birth_date),
            death_date: present(self.death_date),
            description: present(self.description),
            values: present(self.values).map(|v| parse_values(&v)),
        };

        UpdateHero {
            id,
            changes,
            image: self.image,
        }
    }
}
