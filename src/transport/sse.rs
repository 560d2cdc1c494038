//! SSE (Server-Sent Events) transport
//!
//! Uses rmcp's built-in SSE server for remote MCP connections.

pub use rmcp::transport::sse_server::{SseServer, SseServerConfig};

// Required by SseServerConfig
pub use tokio_util::sync::CancellationToken;

use crate::mcp::BinanceServer;
use std::net::SocketAddr;

/// Runs the MCP server over SSE on `addr` until Ctrl+C.
pub async fn run_sse_server(server: BinanceServer, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!(%addr, "starting MCP server on SSE");

    let ct = SseServer::serve(addr)
        .await?
        .with_service(move || server.clone());

    tokio::signal::ctrl_c().await?;
    ct.cancel();

    tracing::info!("MCP server shutdown complete");
    Ok(())
}
