//! Medicine information endpoints: direct lookup, search, and the
//! drug-label-backed generation flow with catalog fallback.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::catalog::{normalize_name, Lookup, MedicineDetails, MedicineRecord};
use crate::chat::tidy_reply;
use crate::extract::extract_medicine_name;
use crate::gateway::DrugLabel;

const SUMMARY_PROMPT: &str = "You are a helpful healthcare assistant. Given official drug \
label excerpts, write a short patient-friendly summary in plain language. Use bullet points \
for key facts. Do not invent information that is not in the excerpts.";

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub medicine_name: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
}

/// GET /medicine-info?query=
pub async fn medicine_info(
    State(ctx): State<ApiContext>,
    Query(params): Query<InfoQuery>,
) -> Result<Json<MedicineRecord>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Query parameter is required".into()))?;
    lookup_catalog(&ctx, &query).map(Json)
}

/// POST /search
pub async fn search(
    State(ctx): State<ApiContext>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<MedicineRecord>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Query is required".into()));
    }
    lookup_catalog(&ctx, &request.query).map(Json)
}

/// POST /generate-medicine-info
///
/// Resolution order: drug-label registry (brand, then generic), then the
/// static catalog by containment. A registry outage degrades to the
/// catalog; only a full miss is a 404.
pub async fn generate_medicine_info(
    State(ctx): State<ApiContext>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<MedicineRecord>, ApiError> {
    let name = request
        .medicine_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| {
            request
                .extracted_text
                .as_deref()
                .and_then(|text| extract_medicine_name(text, ctx.catalog))
        })
        .ok_or_else(|| {
            ApiError::BadRequest("Provide medicineName or extractedText".into())
        })?;

    let normalized = normalize_name(&name);
    info!(%normalized, "generating medicine info");

    match ctx.drug_labels.fetch_label(&normalized).await {
        Ok(Some(label)) => {
            let record = record_from_label(&ctx, &normalized, label).await;
            Ok(Json(record))
        }
        Ok(None) => catalog_fallback(&ctx, &name, request.extracted_text).map(Json),
        Err(err) => {
            warn!(%err, "drug label lookup failed, falling back to catalog");
            catalog_fallback(&ctx, &name, request.extracted_text).map(Json)
        }
    }
}

/// Exact match against normalized catalog keys; a miss is a 404. No
/// fuzzy matching on the primary lookup path.
fn lookup_catalog(ctx: &ApiContext, raw: &str) -> Result<MedicineRecord, ApiError> {
    match ctx.catalog.lookup(raw) {
        Lookup::Found(record) => Ok(record.clone()),
        Lookup::NotFound { .. } => Err(ApiError::NotFound(format!(
            "No information found for \"{raw}\""
        ))),
    }
}

/// Last resort after the registry had nothing: exact catalog match,
/// then containment in either direction.
fn catalog_fallback(
    ctx: &ApiContext,
    name: &str,
    extracted_text: Option<String>,
) -> Result<MedicineRecord, ApiError> {
    let record = match ctx.catalog.lookup(name) {
        Lookup::Found(record) => Some(record),
        Lookup::NotFound { .. } => ctx.catalog.find_by_containment(name),
    };
    record.cloned().ok_or_else(|| ApiError::MedicineNotFound {
        extracted_name: Some(name.to_string()),
        extracted_text,
    })
}

/// Shape a registry label into the client record format. The AI summary
/// is best-effort: a completion failure is logged and the summary
/// omitted, never propagated.
async fn record_from_label(ctx: &ApiContext, normalized: &str, label: DrugLabel) -> MedicineRecord {
    let display_name = label
        .brand_name
        .clone()
        .or_else(|| label.generic_name.clone())
        .unwrap_or_else(|| title_case(normalized));

    let overview = label
        .indications_and_usage
        .first()
        .or_else(|| label.purpose.first())
        .cloned()
        .unwrap_or_else(|| format!("Official label information for {display_name}."));

    let mut ingredients: Vec<String> = label
        .active_ingredient
        .iter()
        .map(|i| format!("Active: {i}"))
        .collect();
    ingredients.extend(
        label
            .inactive_ingredient
            .iter()
            .map(|i| format!("Inactive: {i}")),
    );

    let side_effects = if label.adverse_reactions.is_empty() {
        label.warnings.clone()
    } else {
        label.adverse_reactions.clone()
    };

    let mut contraindications = label.contraindications.clone();
    contraindications.extend(label.drug_interactions.iter().cloned());

    let personalized_info = ai_summary(ctx, &display_name, &label).await;

    MedicineRecord {
        id: format!("label-{}", normalized.replace(' ', "-")),
        name: display_name,
        overview,
        ingredients,
        side_effects,
        conditions_treated: label.purpose.clone(),
        contraindications,
        herbal_alternatives: Vec::new(),
        details: MedicineDetails {
            primary_uses: label.purpose,
            additional_uses: label.indications_and_usage,
            mechanism_of_action: String::new(),
            dosage_info: label.dosage_and_administration.join(" "),
            personalized_info,
        },
    }
}

async fn ai_summary(ctx: &ApiContext, name: &str, label: &DrugLabel) -> String {
    if !ctx.chat_api.is_configured() {
        return String::new();
    }

    let mut excerpts = format!("Medicine: {name}\n");
    for (section, entries) in [
        ("Purpose", &label.purpose),
        ("Indications", &label.indications_and_usage),
        ("Warnings", &label.warnings),
        ("Dosage", &label.dosage_and_administration),
    ] {
        if !entries.is_empty() {
            excerpts.push_str(&format!("{section}: {}\n", entries.join(" ")));
        }
    }

    match ctx.chat_api.complete(SUMMARY_PROMPT, &excerpts).await {
        Ok(summary) => tidy_reply(&summary),
        Err(err) => {
            warn!(%err, "label summary generation failed, omitting summary");
            String::new()
        }
    }
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
