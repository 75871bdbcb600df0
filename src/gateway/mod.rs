//! Clients for hosted upstream services.
//!
//! Two upstreams: a chat-completion API (assistant replies, AI
//! summaries, translation) and a drug-label registry. Both sit behind
//! traits so handlers and tests run against mocks.

pub mod completion;
pub mod drug_label;

pub use completion::{ChatCompletionClient, CompletionApi};
pub use drug_label::{DrugLabel, DrugLabelApi, OpenFdaClient};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API key configured for this upstream.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("http request failed: {0}")]
    Http(String),

    /// Upstream answered 2xx but the body did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    ResponseParsing(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http(err.to_string())
    }
}
