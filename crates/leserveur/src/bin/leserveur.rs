//! leserveur binary entry point

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = leserveur::Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let server = leserveur::Server::new(config)?;

    info!("LeQR server starting on {}", server.server_url());
    server.start().await?;

    Ok(())
}
