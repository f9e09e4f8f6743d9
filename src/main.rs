//! linequery server entry point
//!
//! Starts the TCP search server for the configured reference file.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linequery::core::config::Config;
use linequery::core::services::Services;
use linequery::tcp::Server;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "linequery=info".into());

    // LINEQUERY_LOG_FORMAT=json switches to line-delimited JSON for
    // log shippers.
    if std::env::var("LINEQUERY_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting linequery server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;

    // Log configuration details
    config.log_config();

    // Create shared services
    let services = Arc::new(Services::new(config));

    // Populate the cache up front so the first query does not pay the
    // load cost. Not fatal: cached-mode queries retry the load and
    // fail individually until the file becomes readable.
    if let Err(e) = services.search.load().await {
        tracing::warn!("Failed to preload reference file: {e}");
    }

    // Bind and serve
    let server = Server::bind(services).await?;
    server.run().await?;

    Ok(())
}
