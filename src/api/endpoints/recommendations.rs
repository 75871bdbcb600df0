//! Recommendation endpoint.

use axum::extract::State;
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::catalog::MedicineRecord;
use crate::recommend::recommend;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationsRequest {
    pub health_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub recently_viewed: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationItem {
    #[serde(flatten)]
    pub medicine: MedicineRecord,
    pub relevance: f64,
}

pub async fn recommendations(
    State(ctx): State<ApiContext>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<Vec<RecommendationItem>>, ApiError> {
    let mut rng = StdRng::from_entropy();
    let ranked = recommend(
        ctx.catalog,
        &request.health_conditions,
        &request.allergies,
        &request.recently_viewed,
        ctx.config.recommendation_top_n,
        &mut rng,
    );

    info!(
        conditions = request.health_conditions.len(),
        allergies = request.allergies.len(),
        returned = ranked.len(),
        "recommendations computed"
    );

    let items = ranked
        .into_iter()
        .map(|rec| RecommendationItem {
            medicine: rec.medicine.clone(),
            relevance: rec.relevance,
        })
        .collect();
    Ok(Json(items))
}
