//! Translation endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::profile::Language;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    pub source_language: Language,
    pub target_language: Language,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translation: String,
}

pub async fn translate(
    State(ctx): State<ApiContext>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required".into()));
    }

    let translation = ctx
        .translator
        .translate(
            &request.text,
            request.source_language,
            request.target_language,
        )
        .await?;
    Ok(Json(TranslateResponse { translation }))
}
