//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::gateway::GatewayError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Label text was extracted but matched nothing; the diagnostics let
    /// the client show the user what was read off the label.
    #[error("Medicine not found")]
    MedicineNotFound {
        extracted_name: Option<String>,
        extracted_text: Option<String>,
    },
    /// Endpoint depends on an API key that is not configured.
    #[error("Service not configured: {0}")]
    Unconfigured(&'static str),
    #[error("Upstream failure")]
    Upstream(GatewayError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut extracted_name = None;
        let mut extracted_text = None;

        let (status, code, message) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::MedicineNotFound {
                extracted_name: name,
                extracted_text: text,
            } => {
                extracted_name = name;
                extracted_text = text;
                (
                    StatusCode::NOT_FOUND,
                    "MEDICINE_NOT_FOUND",
                    "Medicine not found in our database".to_string(),
                )
            }
            ApiError::Unconfigured(what) => {
                tracing::warn!(what, "request hit unconfigured service");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERVICE_UNCONFIGURED",
                    "Service is not available right now".to_string(),
                )
            }
            ApiError::Upstream(detail) => {
                tracing::error!(%detail, "upstream failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM",
                    "Failed to process the request".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                extracted_name,
                extracted_text,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingCredential(what) => ApiError::Unconfigured(what),
            other => ApiError::Upstream(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn bad_request_returns_400() {
        let response = ApiError::BadRequest("message is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(json["error"]["message"], "message is required");
    }

    #[tokio::test]
    async fn medicine_not_found_carries_diagnostics() {
        let response = ApiError::MedicineNotFound {
            extracted_name: Some("xq-3 compound".into()),
            extracted_text: Some("xq-3 compound\n500mg".into()),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "MEDICINE_NOT_FOUND");
        assert_eq!(json["error"]["extractedName"], "xq-3 compound");
        assert!(json["error"]["extractedText"]
            .as_str()
            .unwrap()
            .contains("500mg"));
    }

    #[tokio::test]
    async fn plain_not_found_omits_diagnostics() {
        let response = ApiError::NotFound("no such medicine".into()).into_response();
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].get("extractedName").is_none());
    }

    #[tokio::test]
    async fn upstream_detail_is_hidden_from_client() {
        let err: ApiError = GatewayError::UpstreamStatus {
            status: 502,
            body: "secret internal detail".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UPSTREAM");
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("secret"));
    }

    #[tokio::test]
    async fn missing_credential_maps_to_unconfigured() {
        let err: ApiError = GatewayError::MissingCredential("completion api key").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "SERVICE_UNCONFIGURED");
    }
}
