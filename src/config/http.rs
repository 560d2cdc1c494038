//! HTTP Transport Configuration
//!
//! Configuration for the JSON-RPC-over-HTTP MCP transport.

use std::net::SocketAddr;

/// HTTP transport configuration
///
/// ## Environment Variables
///
/// - `HTTP_HOST`: Server bind address (default: 127.0.0.1)
/// - `HTTP_PORT`: Server port (default: 3000)
/// - `HTTP_MAX_SESSIONS`: Max concurrent MCP sessions (default: 50)
/// - `HTTP_SESSION_TIMEOUT_MINUTES`: Idle session timeout (default: 30)
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Server bind address
    pub addr: SocketAddr,

    /// Maximum concurrent MCP sessions
    pub max_sessions: usize,

    /// Idle session timeout in minutes
    pub session_timeout_minutes: i64,
}

impl HttpConfig {
    /// Load HTTP configuration from environment variables.
    ///
    /// An unset or unparseable variable falls back to its default with a
    /// warning rather than aborting startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_parsed("HTTP_PORT", 3000u16);

        let addr = format!("{}:{}", host, port).parse().unwrap_or_else(|_| {
            tracing::warn!(%host, "invalid HTTP_HOST, falling back to 127.0.0.1");
            Self::default().addr
        });

        Self {
            addr,
            max_sessions: env_parsed("HTTP_MAX_SESSIONS", 50usize),
            session_timeout_minutes: env_parsed("HTTP_SESSION_TIMEOUT_MINUTES", 30i64),
        }
    }

    /// Overrides the port; zero means keep the configured one.
    pub fn with_port(mut self, port: u16) -> Self {
        if port != 0 {
            self.addr.set_port(port);
        }
        self
    }
}

fn env_parsed<T: std::str::FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, "unparseable value, using default {}", default);
            default
        }),
        Err(_) => default,
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".parse().expect("static addr"),
            max_sessions: 50,
            session_timeout_minutes: 30,
        }
    }
}
