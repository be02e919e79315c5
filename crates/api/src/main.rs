//! Tara - voice scheduling agent service
//!
//! Binary entry point: logging, environment, configuration, wiring, serve.

use std::sync::Arc;

use tara_api::{router, AppContext};
use tara_infra::config_loader;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first so .env loading is visible.
    tara_api::utils::logging::init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!(error = %e, "no .env file loaded"),
    }

    let config = config_loader::load()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let context = Arc::new(AppContext::new(config)?);
    let app = router(context);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "voice scheduling agent is running");
    axum::serve(listener, app).await?;

    Ok(())
}
