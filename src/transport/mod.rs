//! MCP transport layer
//!
//! Three ways to reach the same tool surface:
//! - Stdio: standard I/O for local MCP clients
//! - SSE: Server-Sent Events for remote MCP connections
//! - HTTP: JSON-RPC 2.0 over HTTP with session management

#[cfg(feature = "http_transport")]
pub mod http;

#[cfg(feature = "mcp_server")]
pub mod stdio;

#[cfg(feature = "mcp_server")]
pub mod sse;
