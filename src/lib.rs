// Library exports for mcp-binance-server

pub mod error;

pub mod binance; // Binance REST client and signed-request subsystem
pub mod config; // Credentials and transport configuration
pub mod tools; // Tool catalog and dispatch

#[cfg(feature = "mcp_server")]
pub mod mcp; // rmcp ServerHandler implementation

pub mod transport; // Stdio, SSE and HTTP transports
