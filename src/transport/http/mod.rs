//! HTTP transport for MCP using Axum
//!
//! Streamable HTTP transport speaking JSON-RPC 2.0, with session management
//! driven by [`HttpConfig`](crate::config::HttpConfig).

pub mod error;
pub mod handler;
pub mod jsonrpc;
pub mod session;

use axum::{routing::post, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::binance::BinanceClient;
use crate::config::HttpConfig;
use handler::{handle_jsonrpc, AppState};
use session::SessionStore;

/// Starts the HTTP server with the MCP JSON-RPC endpoint.
///
/// Serves `POST /mcp` with methods initialize, ping, tools/list and
/// tools/call. CORS allows all origins; restrict this in deployments that
/// face the open internet. Runs until Ctrl+C.
pub async fn start_http_server(config: HttpConfig, client: BinanceClient) -> anyhow::Result<()> {
    tracing::info!("initializing HTTP MCP server");

    let sessions = SessionStore::new(config.max_sessions, config.session_timeout_minutes);

    let state = AppState {
        sessions: sessions.clone(),
        client,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/mcp", post(handle_jsonrpc))
        .layer(cors)
        .with_state(state);

    tracing::info!(addr = %config.addr, "HTTP MCP server listening");
    tracing::info!(
        max_sessions = config.max_sessions,
        timeout_minutes = config.session_timeout_minutes,
        "session management active"
    );

    // Expired sessions get reaped in the background so an idle server does
    // not hold them until the next request arrives.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired_sessions();
            if removed > 0 {
                tracing::debug!(removed, "cleaned up expired sessions");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(%err, "failed to listen for shutdown signal");
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
