use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use disastersense::config::{database, Config};
use disastersense::repository::{MemoryStore, PgStore, Store};
use disastersense::services::mail::{mailer_from_config, MailService};
use disastersense::{create_router, logging, AppState};

const MAIL_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    logging::init_tracing(config.json_logs())?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = database::create_pool(url, config.db_max_connections).await?;
            database::init_db(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let (mail, mail_dispatcher) = MailService::start(mailer_from_config(&config)?);
    let state = Arc::new(AppState::new(config.clone(), store, mail).await?);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it the last mail handle) is gone; let queued mail drain.
    if tokio::time::timeout(MAIL_FLUSH_TIMEOUT, mail_dispatcher).await.is_err() {
        tracing::warn!("Timed out flushing the mail queue");
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
