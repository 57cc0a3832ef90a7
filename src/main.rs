use tracing_subscriber::EnvFilter;

use stories_api::config::{AppConfig, AuthMode};
use stories_api::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    let variant = match config.auth {
        AuthMode::Required => "authenticated",
        AuthMode::Open => "open",
    };
    tracing::info!(port = config.port, variant, "starting stories api");

    server::run(config).await
}
