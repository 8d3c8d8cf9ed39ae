mod cli;

use crate::cli::{Cli, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use zoorl_core::{SystemClock, UrlShortener};
use zoorl_gateway::{App, AppState};
use zoorl_shortener::UrlHashService;
use zoorl_storage::{InMemoryRepository, RedisRepository};
use zoorl_telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();

    let _telemetry = zoorl_telemetry::init(
        TelemetryConfig::builder()
            .service_name("zoorl-gateway")
            .log_format(config.log_format.into())
            .otlp_endpoint(config.otlp_endpoint.clone())
            .build(),
    )
    .context("failed to initialise telemetry")?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let mut purge_task = None;
    let shortener: Arc<dyn UrlShortener> = match config.storage {
        StorageBackendArg::InMemory => {
            let repository = Arc::new(InMemoryRepository::new());
            let period = Duration::from_secs(config.purge_interval_secs);
            info!(
                purge_interval_secs = config.purge_interval_secs,
                "starting in-memory purge task"
            );
            purge_task = Some(Arc::clone(&repository).spawn_purge_task(SystemClock, period));
            Arc::new(UrlHashService::new(repository))
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let repository = RedisRepository::connect(redis_url, config.redis_key_prefix.clone())
                .await
                .context("failed to connect to Redis")?;
            Arc::new(UrlHashService::new(repository))
        }
    };

    let router = App::router(AppState::new(shortener));
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server failed")?;

    if let Some(task) = purge_task {
        task.abort();
    }

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
