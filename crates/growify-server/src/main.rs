mod api;
mod middleware;

use std::sync::Arc;

use growify_store::{MemoryAnalyticsStore, MemoryCrmStore};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(growify_core::load_app_config_from_env()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.webhook_secret.is_none() {
        tracing::warn!(
            "HUBSPOT_WEBHOOK_SECRET is unset or still the placeholder; webhook signature validation is DISABLED"
        );
    }

    let state = AppState {
        config: Arc::clone(&config),
        analytics: Arc::new(MemoryAnalyticsStore::new()),
        crm: Arc::new(MemoryCrmStore::new()),
    };
    let app = build_app(state);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting growify server");
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
