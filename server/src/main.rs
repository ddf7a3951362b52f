use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use client_billing::backend::{create_router, initialize_backend};
use client_billing::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Configuration: {:?}", config);

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.allowed_origin)?;

    let listener = TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
