//! Label photo analysis.
//!
//! The client uploads the label image plus the OCR text it extracted
//! on-device. The image is validated (type, size) but not processed
//! server-side; the text drives name extraction and catalog lookup.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::catalog::{Lookup, MedicineRecord};
use crate::config::MAX_UPLOAD_BYTES;
use crate::extract::extract_medicine_name;

const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

pub async fn analyze(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<MedicineRecord>, ApiError> {
    let mut file_seen = false;
    let mut text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !ACCEPTED_IMAGE_TYPES.contains(&content_type.as_str()) {
                    return Err(ApiError::BadRequest(
                        "File must be a JPEG or PNG image".into(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {e}")))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(ApiError::BadRequest(
                        "File is too large (5 MB maximum)".into(),
                    ));
                }
                if bytes.is_empty() {
                    return Err(ApiError::BadRequest("Uploaded file is empty".into()));
                }
                file_seen = true;
            }
            Some("text") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read text: {e}")))?;
                text = Some(value);
            }
            _ => {} // unknown fields are ignored
        }
    }

    if !file_seen {
        return Err(ApiError::BadRequest("No file provided".into()));
    }
    let text = text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("No extracted text provided".into()))?;

    let Some(name) = extract_medicine_name(&text, ctx.catalog) else {
        return Err(ApiError::MedicineNotFound {
            extracted_name: None,
            extracted_text: Some(text),
        });
    };

    info!(%name, "label analysis extracted candidate name");

    // Exact match on the normalized name only; a near-miss is a 404
    // with the extraction shown back to the user
    match ctx.catalog.lookup(&name) {
        Lookup::Found(record) => Ok(Json(record.clone())),
        Lookup::NotFound { .. } => Err(ApiError::MedicineNotFound {
            extracted_name: Some(name),
            extracted_text: Some(text),
        }),
    }
}
