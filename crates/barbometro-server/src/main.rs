mod api;
mod catalog;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use barbometro_map::ScriptLoader;
use barbometro_sheets::SourceChain;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::catalog::Catalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(barbometro_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting barbometro");

    let guides = barbometro_core::load_guides(&config.guides_path)?;
    tracing::info!(count = guides.len(), path = %config.guides_path.display(), "loaded guides");

    let chain = Arc::new(SourceChain::from_config(&config)?);
    let catalog = Catalog::from_outcome(chain.fetch_restaurants().await);
    if let Some(diagnostic) = catalog.diagnostic() {
        tracing::warn!(diagnostic, "starting with an empty catalog");
    }

    let map_loader = Arc::new(ScriptLoader::new(
        Duration::from_millis(config.map_poll_interval_ms),
        Duration::from_millis(config.map_load_timeout_ms),
    ));

    let state = AppState {
        catalog: Arc::new(RwLock::new(catalog)),
        chain,
        guides: Arc::new(guides),
        config: Arc::clone(&config),
        map_loader,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
