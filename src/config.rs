use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "MediScan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum accepted label image upload (5 MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Maximum chat message length in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "mediscan=info,tower_http=info"
}

/// Runtime configuration, read once from the environment at startup.
///
/// Missing optional credentials degrade the dependent endpoints to a
/// generic error response; they never abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// OpenAI-compatible chat-completion endpoint.
    pub chat_api_url: String,
    pub chat_api_key: Option<String>,
    pub chat_model: String,
    /// Credential for the hosted translation model (same endpoint shape).
    pub translation_api_key: Option<String>,
    /// Base URL of the public drug-label API.
    pub drug_label_api_url: String,
    /// How many recommendations to return.
    pub recommendation_top_n: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_opt("MEDISCAN_BIND_ADDR")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080))),
            chat_api_url: env_opt("COMPLETIONS_API_URL").unwrap_or_else(|| {
                "https://api.together.xyz/v1/chat/completions".to_string()
            }),
            chat_api_key: env_opt("COMPLETIONS_API_KEY"),
            chat_model: env_opt("COMPLETIONS_MODEL")
                .unwrap_or_else(|| "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()),
            translation_api_key: env_opt("TRANSLATION_API_KEY"),
            drug_label_api_url: env_opt("DRUG_LABEL_API_URL")
                .unwrap_or_else(|| "https://api.fda.gov".to_string()),
            recommendation_top_n: env_opt("RECOMMENDATION_TOP_N")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Fixed configuration independent of the process environment.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            chat_api_url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
            chat_api_key: None,
            chat_model: "test-model".to_string(),
            translation_api_key: None,
            drug_label_api_url: "http://127.0.0.1:1".to_string(),
            recommendation_top_n: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_opt(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_mediscan() {
        assert_eq!(APP_NAME, "MediScan");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn upload_cap_is_five_megabytes() {
        assert_eq!(MAX_UPLOAD_BYTES, 5 * 1024 * 1024);
    }

    #[test]
    fn env_opt_ignores_empty() {
        std::env::set_var("MEDISCAN_TEST_EMPTY", "   ");
        assert!(env_opt("MEDISCAN_TEST_EMPTY").is_none());
        std::env::set_var("MEDISCAN_TEST_SET", "value");
        assert_eq!(env_opt("MEDISCAN_TEST_SET").as_deref(), Some("value"));
    }
}
