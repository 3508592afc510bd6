//! Request body extraction for create and update requests.
//!
//! Browsers submit multipart forms (to carry the image), plain url-encoded
//! forms, or JSON. All three are flattened into [`Fields`] plus at most one
//! attached image.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::Fields;
use crate::uploads::UploadedFile;

/// Multipart field name that carries the record image.
pub const IMAGE_FIELD: &str = "image";

/// Decoded request body.
#[derive(Debug, Default)]
pub struct FormPayload {
    pub fields: Fields,
    pub file: Option<UploadedFile>,
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
            // An empty JSON body is an empty object.
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self::default());
            }
            let Json(object) = Json::<Map<String, Value>>::from_bytes(&bytes)
                .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
            Ok(Self {
                fields: Fields::from(object),
                file: None,
            })
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(map) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
            Ok(Self {
                fields: Fields::from(map),
                file: None,
            })
        } else if content_type.is_empty() {
            Ok(Self::default())
        } else {
            Err(AppError::BadRequest(format!(
                "Unsupported content type: {}",
                content_type
            )))
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormPayload, AppError> {
    let mut payload = FormPayload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::rejected(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        let file_name = field.file_name().map(str::to_string);

        match file_name {
            // An unselected file input still sends a part, with an empty name.
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => {
                if name != IMAGE_FIELD {
                    return Err(AppError::BadRequest(format!(
                        "Unexpected file field: {}",
                        name
                    )));
                }
                if payload.file.is_some() {
                    return Err(AppError::BadRequest(
                        "Only one image may be attached".to_string(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
                payload.file = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;
                payload.fields.insert(name, value);
            }
        }
    }

    Ok(payload)
}
