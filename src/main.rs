//! Process entry point: CLI, logging, backend selection, HTTP serve.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;

use cinepulse::api::{router, AppState};
use cinepulse::auth::CredentialService;
use cinepulse::config::{BackendKind, Config};
use cinepulse::feedback::FeedbackService;
use cinepulse::notify::{NoopNotifier, Notifier, WebhookNotifier};
use cinepulse::session::SessionStore;
use cinepulse::storage::{MemoryBackend, StorageBackend};
use cinepulse::{APP_NAME, APP_VERSION, HTTP_BIND_ADDRESS_DEFAULT};

/// CinePulse - movie feedback backend
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Movie feedback backend with pluggable storage")]
#[command(version)]
struct Cli {
    /// HTTP bind address
    #[arg(short, long, default_value = HTTP_BIND_ADDRESS_DEFAULT)]
    bind: String,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,tower_http=debug",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .init();

    tracing::info!("CinePulse v{}", APP_VERSION);

    let config = Config::from_env();

    let storage: Arc<dyn StorageBackend> = match config.backend {
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
        BackendKind::Postgres => build_postgres(&config).await?,
    };

    let notifier: Arc<dyn Notifier> = match &config.webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
        None => Arc::new(NoopNotifier),
    };

    let state = Arc::new(AppState {
        auth: CredentialService::new(storage.clone()),
        feedback: FeedbackService::new(storage.clone(), notifier, config.require_owner),
        sessions: SessionStore::new(),
        storage,
    });

    let app = router(state);

    let listener = TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    tracing::info!("listening on {}", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_postgres(config: &Config) -> anyhow::Result<Arc<dyn StorageBackend>> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;
    let backend = cinepulse::storage::PostgresBackend::new(url).await?;
    Ok(Arc::new(backend))
}

#[cfg(not(feature = "postgres"))]
async fn build_postgres(_config: &Config) -> anyhow::Result<Arc<dyn StorageBackend>> {
    anyhow::bail!("cinepulse was built without the postgres feature")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        tracing::info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
