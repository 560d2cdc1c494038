//! MCP Protocol Layer
//!
//! rmcp-based server surface for the stdio and SSE transports.

pub mod handler;
pub mod server;

pub use server::BinanceServer;
