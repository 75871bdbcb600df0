use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mediscan::api::{build_router, ApiContext};
use mediscan::config::{self, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let config = Config::from_env();
    if config.chat_api_key.is_none() {
        warn!("COMPLETIONS_API_KEY not set, chat and AI summaries are disabled");
    }
    if config.translation_api_key.is_none() {
        warn!("TRANSLATION_API_KEY not set, translation is disabled");
    }

    let bind_addr = config.bind_addr;
    let router = build_router(ApiContext::new(config));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        version = config::APP_VERSION,
        "{} listening",
        config::APP_NAME
    );
    axum::serve(listener, router).await?;
    Ok(())
}
