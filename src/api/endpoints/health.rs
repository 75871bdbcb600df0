//! Liveness and configuration probe.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config::APP_VERSION;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub chat_configured: bool,
    pub translation_configured: bool,
}

pub async fn health(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: APP_VERSION,
        chat_configured: ctx.chat_api.is_configured(),
        translation_configured: ctx.translator.is_configured(),
    })
}
