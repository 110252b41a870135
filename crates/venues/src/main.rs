mod app;
mod cache;
mod config;
mod handlers;
mod middleware;
mod service;
mod state;
mod time;
mod upstream;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    app::create_app,
    cache::ActiveCache,
    config::{Cli, LogFormat},
    service::VenueService,
    state::AppState,
    upstream::RestVenueProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_format);

    let addr = format!("{}:{}", cli.host, cli.port);
    let config = cli.into_config()?;

    let cache = ActiveCache::connect(&config.cache_backend).await?;
    let provider = RestVenueProvider::new(
        config.venues_base_url.clone(),
        config.venues_client_id.clone(),
        config.venues_secret.clone(),
        config.upstream_timeout,
    )?;
    let venues = VenueService::new(
        cache.shared(),
        Arc::new(provider),
        config.cache_ttl,
        config.cache_failure_policy,
    );

    let app = create_app(AppState::new(venues));

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => TcpListener::bind(&addr).await?,
    };

    tracing::info!(
        addr = %listener.local_addr()?,
        cache = cache.backend_name(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "server starting up"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Installs the global subscriber. An unparseable filter falls back to `info`.
fn init_tracing(filter: &str, format: LogFormat) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
