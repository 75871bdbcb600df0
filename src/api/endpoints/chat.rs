//! Assistant chat endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chat::{build_user_prompt, tidy_reply, SYSTEM_PROMPT};
use crate::config::MAX_MESSAGE_CHARS;
use crate::profile::{Language, UserProfile};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

pub async fn chat(
    State(ctx): State<ApiContext>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message is required".into()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Message exceeds {MAX_MESSAGE_CHARS} characters"
        )));
    }

    // Explicit language wins over the profile's
    let language = request
        .language
        .or(request.profile.as_ref().map(|p| p.language))
        .unwrap_or(Language::En);

    let prompt = build_user_prompt(message, language, request.profile.as_ref());
    info!(
        language = language.display_name(),
        chars = message.chars().count(),
        "chat request"
    );

    let raw = ctx.chat_api.complete(SYSTEM_PROMPT, &prompt).await?;
    Ok(Json(ChatResponse {
        response: tidy_reply(&raw),
    }))
}
