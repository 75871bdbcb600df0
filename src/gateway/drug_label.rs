//! Drug-label registry client.
//!
//! Queries the openFDA label endpoint by brand name first, then by
//! generic name. A registry miss is `Ok(None)`, not an error; only
//! transport and parse failures surface as [`GatewayError`].

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::GatewayError;

/// Structured label fields kept from a registry record. Every field is
/// optional; labels in the wild are wildly inconsistent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrugLabel {
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub purpose: Vec<String>,
    pub indications_and_usage: Vec<String>,
    pub active_ingredient: Vec<String>,
    pub inactive_ingredient: Vec<String>,
    pub warnings: Vec<String>,
    pub adverse_reactions: Vec<String>,
    pub drug_interactions: Vec<String>,
    pub dosage_and_administration: Vec<String>,
    pub contraindications: Vec<String>,
}

/// A registry of official drug labels, keyed by medicine name.
#[async_trait]
pub trait DrugLabelApi: Send + Sync {
    /// Look up a label. `Ok(None)` means the registry has no record.
    async fn fetch_label(&self, name: &str) -> Result<Option<DrugLabel>, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct LabelSearchResponse {
    #[serde(default)]
    results: Vec<LabelResult>,
}

#[derive(Debug, Deserialize, Default)]
struct LabelResult {
    #[serde(default)]
    openfda: OpenFdaFields,
    #[serde(default)]
    purpose: Vec<String>,
    #[serde(default)]
    indications_and_usage: Vec<String>,
    #[serde(default)]
    active_ingredient: Vec<String>,
    #[serde(default)]
    inactive_ingredient: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
    #[serde(default)]
    adverse_reactions: Vec<String>,
    #[serde(default)]
    drug_interactions: Vec<String>,
    #[serde(default)]
    dosage_and_administration: Vec<String>,
    #[serde(default)]
    contraindications: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct OpenFdaFields {
    #[serde(default)]
    brand_name: Vec<String>,
    #[serde(default)]
    generic_name: Vec<String>,
}

impl From<LabelResult> for DrugLabel {
    fn from(result: LabelResult) -> Self {
        DrugLabel {
            brand_name: result.openfda.brand_name.into_iter().next(),
            generic_name: result.openfda.generic_name.into_iter().next(),
            purpose: result.purpose,
            indications_and_usage: result.indications_and_usage,
            active_ingredient: result.active_ingredient,
            inactive_ingredient: result.inactive_ingredient,
            warnings: result.warnings,
            adverse_reactions: result.adverse_reactions,
            drug_interactions: result.drug_interactions,
            dosage_and_administration: result.dosage_and_administration,
            contraindications: result.contraindications,
        }
    }
}

/// Reqwest-backed openFDA client.
#[derive(Debug, Clone)]
pub struct OpenFdaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenFdaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn search(&self, query: &str) -> Result<Option<DrugLabel>, GatewayError> {
        let url = format!("{}/drug/label.json", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(&[("search", query), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        // openFDA answers 404 for zero matches
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: LabelSearchResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ResponseParsing(e.to_string()))?;

        Ok(parsed.results.into_iter().next().map(DrugLabel::from))
    }
}

#[async_trait]
impl DrugLabelApi for OpenFdaClient {
    async fn fetch_label(&self, name: &str) -> Result<Option<DrugLabel>, GatewayError> {
        debug!(%name, "drug label lookup");
        let brand = format!("openfda.brand_name:\"{name}\"");
        if let Some(label) = self.search(&brand).await? {
            return Ok(Some(label));
        }
        let generic = format!("openfda.generic_name:\"{name}\"");
        self.search(&generic).await
    }
}

/// Fixed-response label registry for tests.
#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MockDrugLabelApi {
        labels: HashMap<String, DrugLabel>,
        fail: bool,
        pub queries: Mutex<Vec<String>>,
    }

    impl MockDrugLabelApi {
        pub fn empty() -> Self {
            Self::default()
        }

        pub fn with_label(name: &str, label: DrugLabel) -> Self {
            let mut labels = HashMap::new();
            labels.insert(name.to_string(), label);
            Self {
                labels,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl DrugLabelApi for MockDrugLabelApi {
        async fn fetch_label(&self, name: &str) -> Result<Option<DrugLabel>, GatewayError> {
            self.queries.lock().unwrap().push(name.to_string());
            if self.fail {
                return Err(GatewayError::UpstreamStatus {
                    status: 500,
                    body: "mock outage".into(),
                });
            }
            Ok(self.labels.get(name).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_response_parses_and_flattens() {
        let body = r#"{
            "results": [{
                "openfda": {
                    "brand_name": ["Bayer Aspirin"],
                    "generic_name": ["ASPIRIN"]
                },
                "purpose": ["Pain reliever"],
                "active_ingredient": ["Aspirin 325 mg"],
                "warnings": ["Reye's syndrome warning"],
                "dosage_and_administration": ["take with water"]
            }]
        }"#;
        let parsed: LabelSearchResponse = serde_json::from_str(body).unwrap();
        let label: DrugLabel = parsed.results.into_iter().next().unwrap().into();
        assert_eq!(label.brand_name.as_deref(), Some("Bayer Aspirin"));
        assert_eq!(label.generic_name.as_deref(), Some("ASPIRIN"));
        assert_eq!(label.purpose, vec!["Pain reliever"]);
        assert_eq!(label.active_ingredient, vec!["Aspirin 325 mg"]);
        assert!(label.contraindications.is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let parsed: LabelSearchResponse = serde_json::from_str(r#"{"results":[{}]}"#).unwrap();
        let label: DrugLabel = parsed.results.into_iter().next().unwrap().into();
        assert_eq!(label, DrugLabel::default());
    }

    #[test]
    fn empty_results_array_parses() {
        let parsed: LabelSearchResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[tokio::test]
    async fn mock_registry_miss_is_none() {
        use mock::MockDrugLabelApi;
        let registry = MockDrugLabelApi::empty();
        let found = registry.fetch_label("aspirin").await.unwrap();
        assert!(found.is_none());
    }
}
