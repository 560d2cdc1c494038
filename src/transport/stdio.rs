//! Stdio Transport
//!
//! Standard I/O transport for local MCP connections. Messages are read from
//! stdin and responses written to stdout; logging goes to stderr so it never
//! interferes with the protocol stream.

use crate::mcp::BinanceServer;
use rmcp::ServiceExt;

/// Runs the MCP server over stdio until the client disconnects.
pub async fn run_stdio_server(server: BinanceServer) -> anyhow::Result<()> {
    tracing::info!("starting MCP server on stdio");

    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("MCP server ready on stdio");

    service.waiting().await?;

    tracing::info!("MCP server shutdown complete");
    Ok(())
}
