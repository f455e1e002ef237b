//! HTTP server initialization and runtime setup.
//!
//! Builds the backend client and session store, starts the session
//! sweeper, and runs the Axum server until shutdown.

use crate::application::services::AuthService;
use crate::config::Config;
use crate::domain::gateways::{LinkGateway, SessionStore};
use crate::infrastructure::http::HttpLinkGateway;
use crate::infrastructure::session::InMemorySessionStore;
use crate::routes::app_router;
use crate::state::{AppState, SessionSettings};

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Backend HTTP client
/// - In-memory session store
/// - Background session sweeper
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The backend URL is unusable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let gateway: Arc<dyn LinkGateway> =
        Arc::new(HttpLinkGateway::new(&config.backend_url, config.request_timeout())?);
    tracing::info!(backend = %config.masked_backend_url(), "Backend client ready");

    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let state = AppState::new(
        gateway,
        sessions,
        SessionSettings::from_config(&config),
        config.masked_backend_url(),
    );

    tokio::spawn(run_session_sweeper(
        state.auth_service.clone(),
        config.session_sweep_interval(),
    ));
    tracing::info!(
        interval_seconds = config.session_sweep_seconds,
        "Session sweeper started"
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Periodically drops sessions older than the session lifetime.
pub async fn run_session_sweeper(
    auth: Arc<AuthService<dyn LinkGateway, dyn SessionStore>>,
    every: Duration,
) {
    let mut ticker = tokio::time::interval(every);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let purged = auth.purge_expired(Utc::now()).await;
        if purged > 0 {
            tracing::info!(purged, "Expired sessions removed");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
