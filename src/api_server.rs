// BSD 3-Clause License
// Copyright (c) 2025, NØNOS - NOXTERM

use anyhow::Result;
use api_server::{ConfigRegistry, ValidatedConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("api_server=info,tower_http=info")),
        )
        .json()
        .with_target(false)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .init();

    info!(
        "Starting api-server {} (built {})",
        api_server::VERSION,
        api_server::BUILD_TIME
    );

    // Exits with the full report before anything binds.
    let validated = ValidatedConfig::from_env()?;
    validated.log_production_warnings();

    let registry = ConfigRegistry::project(&validated);
    api_server::serve(registry).await
}
