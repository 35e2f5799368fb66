use std::net::SocketAddr;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use parksys::database::{self, schema};
use parksys::{build_router, AppState, Config};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        error!("Server stopped with error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::load()?;
    match &config.mail {
        Some(mail) => info!(host = %mail.host, "mail service configured"),
        None => info!("mail service not configured"),
    }

    info!("Connecting to database: {}", config.database_url);
    let pool = database::open_pool(&config.database_url, config.db_max_connections).await?;
    schema::ensure_schema(&pool).await?;

    let listener = bind_with_fallback(&config).await?;
    let bound_addr = listener.local_addr()?;
    info!("Server running on http://{}", bound_addr);

    let app = build_router(AppState::new(pool.clone(), config)?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Draining connection pool");
    pool.close().await;
    Ok(())
}

/// Tries the configured port, then the next one.
async fn bind_with_fallback(config: &Config) -> std::io::Result<TcpListener> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            let fallback = SocketAddr::new(addr.ip(), addr.port().saturating_add(1));
            warn!("Could not bind {}: {}. Trying fallback {}", addr, e, fallback);
            TcpListener::bind(fallback).await
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
}
