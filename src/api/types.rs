//! Shared state for the API router.

use std::sync::Arc;

use crate::catalog::{catalog, Catalog};
use crate::config::Config;
use crate::gateway::{ChatCompletionClient, CompletionApi, DrugLabelApi, OpenFdaClient};
use crate::translate::Translator;

/// Shared context for all API routes. Cheap to clone; every field is a
/// shared handle or static.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<Config>,
    pub catalog: &'static Catalog,
    pub chat_api: Arc<dyn CompletionApi>,
    pub drug_labels: Arc<dyn DrugLabelApi>,
    pub translator: Arc<Translator>,
}

impl ApiContext {
    /// Wire up production gateways from configuration.
    pub fn new(config: Config) -> Self {
        let chat_api: Arc<dyn CompletionApi> = Arc::new(ChatCompletionClient::new(
            config.chat_api_url.clone(),
            config.chat_model.clone(),
            config.chat_api_key.clone(),
        ));
        // Translation rides the same endpoint with its own credential
        let translation_api: Arc<dyn CompletionApi> = Arc::new(ChatCompletionClient::new(
            config.chat_api_url.clone(),
            config.chat_model.clone(),
            config.translation_api_key.clone(),
        ));
        let drug_labels: Arc<dyn DrugLabelApi> =
            Arc::new(OpenFdaClient::new(config.drug_label_api_url.clone()));

        Self {
            config: Arc::new(config),
            catalog: catalog(),
            chat_api,
            drug_labels,
            translator: Arc::new(Translator::new(translation_api)),
        }
    }

    /// Context with injected gateway doubles, for router tests.
    #[cfg(test)]
    pub fn for_tests(
        config: Config,
        chat_api: Arc<dyn CompletionApi>,
        drug_labels: Arc<dyn DrugLabelApi>,
        translation_api: Arc<dyn CompletionApi>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog: catalog(),
            chat_api,
            drug_labels,
            translator: Arc::new(Translator::new(translation_api)),
        }
    }
}
