//! Route table and middleware stack.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints::{analyze, chat, health, medicine, recommendations, translate};
use crate::api::types::ApiContext;
use crate::config::MAX_UPLOAD_BYTES;

/// Build the application router. Middleware order: body limit sized for
/// the label upload plus multipart overhead, then trace, then CORS.
pub fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/analyze", post(analyze::analyze))
        .route("/chat", post(chat::chat))
        .route("/generate-medicine-info", post(medicine::generate_medicine_info))
        .route("/medicine-info", get(medicine::medicine_info))
        .route("/search", post(medicine::search))
        .route("/recommendations", post(recommendations::recommendations))
        .route("/translate", post(translate::translate))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
